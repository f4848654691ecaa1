use event_payments::domain::access::{authorize, AccessFacts, Caller, Relationship};
use uuid::Uuid;

const STATUS_UPDATERS: &[Relationship] = &[Relationship::Owner, Relationship::Organizer, Relationship::Admin];
const EVENT_REPORT_READERS: &[Relationship] = &[Relationship::Organizer, Relationship::Admin];

fn user() -> Caller {
    Caller {
        user_id: Uuid::new_v4(),
        role: Some("user".to_string()),
    }
}

#[test]
fn payer_and_organizer_may_update_status() {
    let payer = user();
    let organizer = user();
    let facts = AccessFacts {
        owner: Some(payer.user_id),
        organizer: Some(organizer.user_id),
    };

    assert!(authorize(&payer, &facts, STATUS_UPDATERS).is_ok());
    assert!(authorize(&organizer, &facts, STATUS_UPDATERS).is_ok());
}

#[test]
fn admin_role_overrides_missing_relationship() {
    let admin = Caller {
        user_id: Uuid::new_v4(),
        role: Some("admin".to_string()),
    };
    let facts = AccessFacts {
        owner: Some(Uuid::new_v4()),
        organizer: Some(Uuid::new_v4()),
    };
    assert!(authorize(&admin, &facts, STATUS_UPDATERS).is_ok());
    assert!(authorize(&admin, &facts, EVENT_REPORT_READERS).is_ok());
}

#[test]
fn stranger_is_forbidden() {
    let facts = AccessFacts {
        owner: Some(Uuid::new_v4()),
        organizer: Some(Uuid::new_v4()),
    };
    let err = authorize(&user(), &facts, STATUS_UPDATERS).unwrap_err();
    assert_eq!(err.status.as_u16(), 403);
    assert_eq!(err.message, "Unauthorized");
}

#[test]
fn payer_cannot_read_event_report() {
    let payer = user();
    let facts = AccessFacts {
        owner: Some(payer.user_id),
        organizer: Some(Uuid::new_v4()),
    };
    assert!(authorize(&payer, &facts, EVENT_REPORT_READERS).is_err());
}

#[test]
fn organizer_unknown_when_event_deleted() {
    let caller = user();
    let facts = AccessFacts {
        owner: Some(Uuid::new_v4()),
        organizer: None,
    };
    assert!(authorize(&caller, &facts, STATUS_UPDATERS).is_err());
}
