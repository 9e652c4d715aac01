use loom::sync::atomic::AtomicUsize;
use loom::sync::atomic::Ordering;
use loom::thread;
use pdc_id::core::Handle;
use pdc_id::core::Kind;
use pdc_id::core::Resource;
use pdc_id::registry::Registry;
use triomphe::Arc;

struct Object;

impl Resource for Object {}

fn registry(destroyed: std::sync::Arc<AtomicUsize>) -> Registry {
  let registry: Registry = Registry::new();

  registry
    .register_type(Kind::OBJ, move |_| {
      destroyed.fetch_add(1, Ordering::SeqCst);
      Ok(())
    })
    .unwrap();

  registry
}

#[test]
fn concurrent_decrement_destroys_once() {
  loom::model(|| {
    let destroyed: std::sync::Arc<AtomicUsize> = std::sync::Arc::new(AtomicUsize::new(0));
    let registry: Arc<Registry> = Arc::new(registry(std::sync::Arc::clone(&destroyed)));
    let handle: Handle = registry.allocate(Kind::OBJ, Object).unwrap();

    registry.increment(handle).unwrap();

    let threads: Vec<_> = (0..2)
      .map(|_| {
        let registry: Arc<Registry> = Arc::clone(&registry);
        thread::spawn(move || registry.decrement(handle).unwrap())
      })
      .collect();

    let counts: Vec<u32> = threads
      .into_iter()
      .map(|thread| thread.join().unwrap())
      .collect();

    assert!(counts.contains(&0) && counts.contains(&1));
    assert_eq!(destroyed.load(Ordering::SeqCst), 1, "Destructor must run once");
    assert!(registry.find(handle).is_none());
  });
}

#[test]
fn concurrent_allocate_unique_handles() {
  loom::model(|| {
    let destroyed: std::sync::Arc<AtomicUsize> = std::sync::Arc::new(AtomicUsize::new(0));
    let registry: Arc<Registry> = Arc::new(registry(destroyed));

    let t1 = {
      let registry: Arc<Registry> = Arc::clone(&registry);
      thread::spawn(move || registry.allocate(Kind::OBJ, Object).unwrap())
    };

    let t2 = {
      let registry: Arc<Registry> = Arc::clone(&registry);
      thread::spawn(move || registry.allocate(Kind::OBJ, Object).unwrap())
    };

    let handle1: Handle = t1.join().unwrap();
    let handle2: Handle = t2.join().unwrap();

    assert_ne!(handle1, handle2, "Concurrent allocations produced same handle!");

    assert!(registry.find(handle1).is_some());
    assert!(registry.find(handle2).is_some());
  });
}

#[test]
fn increment_races_final_decrement() {
  loom::model(|| {
    let destroyed: std::sync::Arc<AtomicUsize> = std::sync::Arc::new(AtomicUsize::new(0));
    let registry: Arc<Registry> = Arc::new(registry(std::sync::Arc::clone(&destroyed)));
    let handle: Handle = registry.allocate(Kind::OBJ, Object).unwrap();

    let t1 = {
      let registry: Arc<Registry> = Arc::clone(&registry);
      thread::spawn(move || registry.increment(handle).is_ok())
    };

    let t2 = {
      let registry: Arc<Registry> = Arc::clone(&registry);
      thread::spawn(move || registry.decrement(handle).unwrap())
    };

    let revived: bool = t1.join().unwrap();
    let remaining: u32 = t2.join().unwrap();

    if revived {
      assert_eq!(remaining, 1);
      assert_eq!(destroyed.load(Ordering::SeqCst), 0);
      assert!(registry.find(handle).is_some());
    } else {
      assert_eq!(remaining, 0);
      assert_eq!(destroyed.load(Ordering::SeqCst), 1);
      assert!(registry.find(handle).is_none());
    }
  });
}

#[test]
fn clear_type_races_decrement() {
  loom::model(|| {
    let destroyed: std::sync::Arc<AtomicUsize> = std::sync::Arc::new(AtomicUsize::new(0));
    let registry: Arc<Registry> = Arc::new(registry(std::sync::Arc::clone(&destroyed)));
    let handle: Handle = registry.allocate(Kind::OBJ, Object).unwrap();

    let t1 = {
      let registry: Arc<Registry> = Arc::clone(&registry);
      thread::spawn(move || registry.clear_type(Kind::OBJ).unwrap())
    };

    let t2 = {
      let registry: Arc<Registry> = Arc::clone(&registry);
      thread::spawn(move || {
        let _ignore = registry.decrement(handle);
      })
    };

    t1.join().unwrap();
    t2.join().unwrap();

    assert_eq!(destroyed.load(Ordering::SeqCst), 1, "Destructor must run once");
    assert_eq!(registry.len(Kind::OBJ), Ok(0));
  });
}
