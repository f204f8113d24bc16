//! Emission behavior across threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use devkit_signal::{EmitReport, Signal, SignalDispatcher};

#[derive(Debug)]
struct UserCreated {
    email: String,
}

#[test]
fn every_listener_receives_signal_and_payload() {
    let dispatcher = SignalDispatcher::<UserCreated>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    for tag in ["mailer", "audit"] {
        let seen = seen.clone();
        dispatcher.connect("user-created", move |signal: &Signal, user: &UserCreated| {
            seen.lock()
                .unwrap()
                .push(format!("{}:{}:{}", tag, signal, user.email));
        });
    }

    let report = dispatcher.emit(
        "user-created",
        &UserCreated {
            email: "ada@example.com".into(),
        },
    );

    assert_eq!(
        report,
        EmitReport {
            delivered: 2,
            panicked: 0
        }
    );
    let mut seen = seen.lock().unwrap().clone();
    seen.sort();
    assert_eq!(
        seen,
        vec![
            "audit:user-created:ada@example.com",
            "mailer:user-created:ada@example.com",
        ]
    );
}

#[test]
fn other_signals_are_not_delivered() {
    let dispatcher = SignalDispatcher::<()>::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    dispatcher.connect("a", move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(dispatcher.emit("b", &()).total(), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn callbacks_run_concurrently() {
    // Each callback waits on a barrier sized for all of them. Sequential
    // execution would never get past the first wait.
    const LISTENERS: usize = 4;
    let dispatcher = SignalDispatcher::<()>::new();
    let barrier = Arc::new(Barrier::new(LISTENERS));

    for _ in 0..LISTENERS {
        let barrier = barrier.clone();
        dispatcher.connect("tick", move |_, _| {
            barrier.wait();
        });
    }

    assert_eq!(dispatcher.emit("tick", &()).delivered, LISTENERS);
}

#[test]
fn emit_waits_for_slow_callbacks() {
    let dispatcher = SignalDispatcher::<()>::new();
    let done = Arc::new(AtomicUsize::new(0));

    for delay in [30u64, 10, 0] {
        let done = done.clone();
        dispatcher.connect("work", move |_, _| {
            thread::sleep(Duration::from_millis(delay));
            done.fetch_add(1, Ordering::SeqCst);
        });
    }

    dispatcher.emit("work", &());
    assert_eq!(done.load(Ordering::SeqCst), 3);
}

#[test]
fn panicking_callback_is_isolated() {
    let dispatcher = SignalDispatcher::<()>::new();
    let survivors = Arc::new(AtomicUsize::new(0));

    dispatcher.connect("boom", |_, _| panic!("listener failed"));
    for _ in 0..2 {
        let survivors = survivors.clone();
        dispatcher.connect("boom", move |_, _| {
            thread::sleep(Duration::from_millis(5));
            survivors.fetch_add(1, Ordering::SeqCst);
        });
    }

    let report = dispatcher.emit("boom", &());

    assert_eq!(report.panicked, 1);
    assert_eq!(report.delivered, 2);
    assert!(!report.is_clean());
    assert_eq!(survivors.load(Ordering::SeqCst), 2);

    // The dispatcher stays usable afterwards.
    assert_eq!(dispatcher.listener_count("boom"), 3);
    assert_eq!(dispatcher.emit("boom", &()).delivered, 2);
}

#[test]
fn callback_may_connect_during_emit() {
    let dispatcher = Arc::new(SignalDispatcher::<()>::new());
    let inner = Arc::downgrade(&dispatcher);

    dispatcher.connect("grow", move |_, _| {
        if let Some(dispatcher) = inner.upgrade() {
            dispatcher.connect("grow", |_, _| {});
        }
    });

    assert_eq!(dispatcher.emit("grow", &()).delivered, 1);
    assert_eq!(dispatcher.listener_count("grow"), 2);
}

#[test]
fn shared_across_threads() {
    let dispatcher = Arc::new(SignalDispatcher::<usize>::new());
    let total = Arc::new(AtomicUsize::new(0));

    let counter = total.clone();
    dispatcher.connect("add", move |_, n| {
        counter.fetch_add(*n, Ordering::SeqCst);
    });

    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let dispatcher = dispatcher.clone();
            thread::spawn(move || dispatcher.emit("add", &n))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_clean());
    }

    assert_eq!(total.load(Ordering::SeqCst), 10);
}
