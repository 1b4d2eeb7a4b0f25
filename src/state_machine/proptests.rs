//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::api::{ApiErrorKind, ChatResponse};
use crate::intake::PatientState;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_session() -> impl Strategy<Value = Session> {
    ("[a-z0-9]{6}", "[A-Za-z /&]{0,30}", any::<bool>()).prop_map(|(id, phase, complete)| {
        Session { id, phase, complete }
    })
}

fn arb_ticket() -> impl Strategy<Value = RequestTicket> {
    prop_oneof![
        (0u64..20).prop_map(RequestTicket::start),
        (0u64..20, "[a-z0-9]{6}").prop_map(|(id, session)| RequestTicket::reply(id, session)),
    ]
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::default()),
        Just(SessionState::Idle {
            notice: Some(START_FAILURE_NOTICE.to_string())
        }),
        arb_ticket().prop_map(|ticket| SessionState::Starting { ticket }),
        (arb_session(), proptest::option::of(arb_ticket())).prop_map(|(mut session, pending)| {
            session.complete = false;
            SessionState::Active { session, pending }
        }),
        arb_session().prop_map(|mut session| {
            session.complete = true;
            SessionState::Complete { session }
        }),
    ]
}

fn arb_response() -> impl Strategy<Value = ChatResponse> {
    (
        "[a-z0-9]{6}",
        proptest::option::of("[A-Za-z ]{0,20}"),
        proptest::option::of(proptest::collection::vec("[a-z]{3,8}", 0..3)),
        prop_oneof![
            Just("Gathering patient demographic details".to_string()),
            Just("Symptoms collection".to_string()),
            Just("Complete".to_string()),
            "[A-Za-z ]{0,20}",
        ],
        any::<bool>(),
    )
        .prop_map(|(session_id, assistant_message, main_symptoms, phase, is_complete)| {
            ChatResponse {
                session_id,
                assistant_message,
                state: PatientState {
                    main_symptoms,
                    ..PatientState::default()
                },
                phase,
                is_complete,
            }
        })
}

fn arb_completion() -> impl Strategy<Value = Event> {
    prop_oneof![
        (arb_ticket(), arb_response())
            .prop_map(|(ticket, response)| Event::StartSucceeded { ticket, response }),
        arb_ticket().prop_map(|ticket| Event::StartFailed {
            ticket,
            message: "boom".to_string(),
            error_kind: ApiErrorKind::Network,
        }),
        (arb_ticket(), arb_response())
            .prop_map(|(ticket, response)| Event::ReplySucceeded { ticket, response }),
        arb_ticket().prop_map(|ticket| Event::ReplyFailed {
            ticket,
            message: "boom".to_string(),
            error_kind: ApiErrorKind::ServerError,
        }),
    ]
}

fn arb_blank_text() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

fn completion_ticket(event: &Event) -> Option<&RequestTicket> {
    match event {
        Event::StartSucceeded { ticket, .. }
        | Event::StartFailed { ticket, .. }
        | Event::ReplySucceeded { ticket, .. }
        | Event::ReplyFailed { ticket, .. } => Some(ticket),
        _ => None,
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_reset_always_yields_empty_idle(state in arb_state()) {
        let result = transition(&state, Event::Reset).unwrap();
        prop_assert_eq!(result.new_state, SessionState::default());
        prop_assert_eq!(result.effects, vec![Effect::ClearTranscript, Effect::ClearPatientState]);
    }

    #[test]
    fn prop_blank_send_is_rejected(state in arb_state(), text in arb_blank_text(), id in 0u64..100) {
        let result = transition(&state, Event::Send { text, request_id: id });
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_send_while_pending_is_rejected(
        session in arb_session(),
        ticket in arb_ticket(),
        text in "[a-z ]{1,20}",
    ) {
        let state = SessionState::Active { session, pending: Some(ticket) };
        let result = transition(&state, Event::Send { text, request_id: 99 });
        prop_assert_eq!(result.unwrap_err(), TransitionError::RequestInFlight);
    }

    #[test]
    fn prop_send_outside_active_is_rejected(state in arb_state(), text in "[a-z]{1,20}") {
        prop_assume!(!matches!(state, SessionState::Active { .. }));
        let result = transition(&state, Event::Send { text, request_id: 1 });
        prop_assert_eq!(result.unwrap_err(), TransitionError::NotActive);
    }

    #[test]
    fn prop_unmatched_completion_never_applies(state in arb_state(), event in arb_completion()) {
        let ticket = completion_ticket(&event).cloned();
        prop_assume!(state.in_flight() != ticket.as_ref());
        let result = transition(&state, event);
        prop_assert!(
            matches!(result, Err(TransitionError::StaleResponse { .. })),
            "expected stale response, got {:?}",
            result
        );
    }

    #[test]
    fn prop_completion_clears_pending(state in arb_state(), event in arb_completion()) {
        if let Ok(result) = transition(&state, event) {
            prop_assert!(!result.new_state.is_pending());
        }
    }

    #[test]
    fn prop_session_id_and_completion_are_sticky(
        session in arb_session(),
        response in arb_response(),
        id in 0u64..100,
    ) {
        let session = Session { complete: false, ..session };
        let ticket = RequestTicket::reply(id, session.id.clone());
        let state = SessionState::Active { session: session.clone(), pending: Some(ticket.clone()) };

        let result = transition(&state, Event::ReplySucceeded { ticket, response: response.clone() }).unwrap();
        let next = result.new_state.session().unwrap();

        prop_assert_eq!(&next.id, &session.id);
        prop_assert_eq!(next.complete, response.is_complete);
        prop_assert_eq!(
            matches!(result.new_state, SessionState::Complete { .. }),
            response.is_complete
        );
    }

    #[test]
    fn prop_complete_only_leaves_via_reset(session in arb_session(), text in "[a-z]{1,10}", event in arb_completion()) {
        let state = SessionState::Complete { session: Session { complete: true, ..session } };

        let send = transition(&state, Event::Send { text, request_id: 1 });
        let start = transition(&state, Event::Start { request_id: 1 });
        prop_assert!(send.is_err());
        prop_assert!(start.is_err());
        prop_assert!(transition(&state, event).is_err());
    }
}
