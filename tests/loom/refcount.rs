use loom::sync::Arc;
use loom::sync::atomic::Ordering;
use loom::thread;
use pdc_id::tyre::num::AtomicRefCount;
use pdc_id::tyre::num::Release;

#[test]
fn release_claims_exactly_once() {
  loom::model(|| {
    let count: Arc<AtomicRefCount> = Arc::new(AtomicRefCount::new());

    assert!(count.acquire().is_some());

    let threads: Vec<_> = (0..2)
      .map(|_| {
        let count: Arc<AtomicRefCount> = Arc::clone(&count);
        thread::spawn(move || count.release())
      })
      .collect();

    let claims: usize = threads
      .into_iter()
      .map(|thread| thread.join().unwrap())
      .filter(|release| matches!(release, Some(Release::Claimed)))
      .count();

    assert_eq!(claims, 1, "Zero transition must be claimed once");
    assert_eq!(count.load(Ordering::Acquire), AtomicRefCount::CLAIMED);
  });
}

#[test]
fn acquire_after_claim_fails() {
  loom::model(|| {
    let count: Arc<AtomicRefCount> = Arc::new(AtomicRefCount::new());

    let t1 = {
      let count: Arc<AtomicRefCount> = Arc::clone(&count);
      thread::spawn(move || count.acquire())
    };

    let t2 = {
      let count: Arc<AtomicRefCount> = Arc::clone(&count);
      thread::spawn(move || count.release())
    };

    let acquired = t1.join().unwrap();
    let released = t2.join().unwrap();

    match released {
      // Release ran first: the counter is gone and cannot be revived.
      Some(Release::Claimed) => assert!(acquired.is_none()),
      // Acquire ran first: one reference remains.
      Some(Release::Live(count)) => {
        assert_eq!(count.get(), 1);
        assert_eq!(acquired.map(|count| count.get()), Some(2));
      }
      None => panic!("Release on a live counter must succeed"),
    }
  });
}

#[test]
fn claim_races_release() {
  loom::model(|| {
    let count: Arc<AtomicRefCount> = Arc::new(AtomicRefCount::new());

    let t1 = {
      let count: Arc<AtomicRefCount> = Arc::clone(&count);
      thread::spawn(move || count.claim())
    };

    let t2 = {
      let count: Arc<AtomicRefCount> = Arc::clone(&count);
      thread::spawn(move || matches!(count.release(), Some(Release::Claimed)))
    };

    let claimed: bool = t1.join().unwrap();
    let released: bool = t2.join().unwrap();

    assert!(claimed ^ released, "Exactly one thread must own destruction");
  });
}

#[test]
fn abandoned_claim_is_retryable() {
  loom::model(|| {
    let count: Arc<AtomicRefCount> = Arc::new(AtomicRefCount::new());

    assert_eq!(count.release(), Some(Release::Claimed));

    count.abandon();

    let threads: Vec<_> = (0..2)
      .map(|_| {
        let count: Arc<AtomicRefCount> = Arc::clone(&count);
        thread::spawn(move || count.release())
      })
      .collect();

    let results: Vec<Option<Release>> = threads
      .into_iter()
      .map(|thread| thread.join().unwrap())
      .collect();

    assert!(results.contains(&Some(Release::Claimed)));
    assert!(results.contains(&None));
  });
}
