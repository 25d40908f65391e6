use super::*;
use shared::models::OrderStatus::*;

const ALL: [shared::models::OrderStatus; 4] = [Pending, Processing, Completed, Cancelled];

#[test]
fn exactly_five_pairs_are_legal() {
    let legal = [
        (Pending, Processing),
        (Pending, Completed),
        (Pending, Cancelled),
        (Processing, Completed),
        (Processing, Cancelled),
    ];

    for current in ALL {
        for target in ALL {
            let expected = legal.contains(&(current, target));
            assert_eq!(
                can_transition(current, target),
                expected,
                "{current} -> {target}"
            );
        }
    }
}

#[test]
fn identity_pairs_are_rejected() {
    for status in ALL {
        assert!(!can_transition(status, status), "{status} -> {status}");
    }
}

#[test]
fn terminal_states_offer_nothing() {
    assert!(available_transitions(Completed).is_empty());
    assert!(available_transitions(Cancelled).is_empty());
    assert!(is_terminal(Completed));
    assert!(is_terminal(Cancelled));
}

#[test]
fn open_states_offer_their_legal_targets() {
    assert_eq!(
        available_transitions(Pending),
        &[Processing, Completed, Cancelled]
    );
    assert_eq!(available_transitions(Processing), &[Completed, Cancelled]);
    assert!(!is_terminal(Pending));
    assert!(!is_terminal(Processing));
}

#[test]
fn offered_transitions_match_the_table() {
    // Everything offered must be legal, everything legal must be offered
    for current in ALL {
        let offered = available_transitions(current);
        for target in ALL {
            assert_eq!(
                offered.contains(&target),
                can_transition(current, target),
                "{current} -> {target}"
            );
        }
    }
}
