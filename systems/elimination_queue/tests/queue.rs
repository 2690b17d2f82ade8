use quarantine_arcade_core::{AccountId, Identity, IdentityId};
use quarantine_arcade_system_elimination_queue::EliminationQueue;

fn identity(id: &str) -> Identity {
    Identity::new(IdentityId::new(id), format!("Player {id}"), AccountId::new("acct-1"))
}

#[test]
fn drain_preserves_enqueue_order() {
    let mut queue = EliminationQueue::new();
    for id in ["c", "a", "b"] {
        queue.enqueue(identity(id));
    }
    assert_eq!(queue.len(), 3);

    let drained = queue.drain();
    let ids: Vec<&str> = drained
        .iter()
        .map(|record| record.identity().id().as_str())
        .collect();
    assert_eq!(ids, ["c", "a", "b"]);

    let sequences: Vec<u64> = drained.iter().map(|record| record.sequence()).collect();
    assert_eq!(sequences, [0, 1, 2]);
}

#[test]
fn second_drain_returns_empty_batch() {
    let mut queue = EliminationQueue::new();
    queue.enqueue(identity("a"));
    queue.enqueue(identity("b"));

    assert_eq!(queue.drain().len(), 2);
    assert!(queue.drain().is_empty(), "records must never be committed twice");
    assert!(queue.is_empty());
}

#[test]
fn clear_discards_without_returning() {
    let mut queue = EliminationQueue::new();
    queue.enqueue(identity("a"));
    queue.clear();

    assert_eq!(queue.len(), 0);
    assert!(queue.drain().is_empty());
}

#[test]
fn sequence_keeps_counting_after_drain() {
    let mut queue = EliminationQueue::new();
    queue.enqueue(identity("a"));
    let _ = queue.drain();
    queue.enqueue(identity("b"));

    assert_eq!(queue.records()[0].sequence(), 1);
}
