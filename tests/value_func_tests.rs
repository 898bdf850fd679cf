use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use symbol_annotations::{CliArgument, CliOption, CliSymbol, Subsystem, ValueFn};

#[test]
fn test_set_does_not_evaluate() {
    let defaults = Subsystem::new("defaults");
    let default_value = defaults.value_func_accessor::<String>("default_value");
    let calls = Arc::new(AtomicUsize::new(0));
    let option = CliOption::<String>::new("--config");

    for _ in 0..3 {
        let calls = Arc::clone(&calls);
        default_value.set(&option, move || {
            calls.fetch_add(1, Ordering::SeqCst);
            "app.toml".to_string()
        });
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_invocations_match_reader_calls() {
    let defaults = Subsystem::new("defaults");
    let default_value = defaults.value_func_accessor::<usize>("default_value");
    let calls = Arc::new(AtomicUsize::new(0));
    let argument = CliArgument::<usize>::new("jobs");

    let counter = Arc::clone(&calls);
    default_value.set(&argument, move || counter.fetch_add(1, Ordering::SeqCst) + 1);

    let factory = default_value.try_get(&argument).expect("default was set");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(factory(), 1);
    assert_eq!(factory(), 2);
    assert_eq!(default_value.try_get_value(&argument), Some(3));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_shared_factory() {
    let defaults = Subsystem::new("defaults");
    let default_value = defaults.value_func_accessor::<u16>("default_value");
    let factory: ValueFn<u16> = Arc::new(|| 443);

    let http = CliOption::<u16>::new("--http-port");
    let https = CliOption::<u16>::new("--https-port");
    default_value.set_fn(&http, Arc::clone(&factory));
    default_value.set_fn(&https, factory);

    assert_eq!(default_value.try_get_value(&http), Some(443));
    assert_eq!(default_value.try_get_value(&https), Some(443));
}

#[test]
fn test_overwrite_replaces_factory() {
    let defaults = Subsystem::new("defaults");
    let default_value = defaults.value_func_accessor::<&'static str>("default_value");
    let option = CliOption::<&'static str>::new("--mode");

    default_value.set(&option, || "fast");
    default_value.set(&option, || "safe");

    assert_eq!(default_value.try_get_value(&option), Some("safe"));
}

#[test]
fn test_absent_and_untyped_lookup() {
    let defaults = Subsystem::new("defaults");
    let default_value = defaults.value_func_accessor::<bool>("default_value");
    let set = CliOption::<bool>::new("--color");
    let unset = CliOption::<bool>::new("--quiet");
    let other = CliOption::<i64>::new("--offset");

    default_value.set(&set, || true);

    assert!(default_value.try_get(&unset).is_none());
    assert_eq!(default_value.try_get_value(&unset), None);

    let untyped: &CliSymbol = &set;
    let factory = default_value
        .try_get_as::<bool>(untyped)
        .expect("declared type matches")
        .expect("default was set");
    assert!(factory());

    assert!(default_value
        .try_get_as::<bool>(&other)
        .expect("absence is not an error")
        .is_none());
}

#[test]
fn test_thread_safety() {
    let defaults = Subsystem::new("defaults");
    let default_value = defaults.value_func_accessor::<usize>("default_value");

    let options: Vec<CliOption<usize>> = (0..10)
        .map(|i| CliOption::new(format!("--worker-{}", i)))
        .collect();

    let mut handles = vec![];
    for (i, option) in options.iter().cloned().enumerate() {
        let default_value = default_value.clone();
        handles.push(thread::spawn(move || {
            for round in 0..100 {
                default_value.set(&option, move || i * 1000 + round);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    for (i, option) in options.iter().enumerate() {
        assert_eq!(default_value.try_get_value(option), Some(i * 1000 + 99));
    }
    assert_eq!(defaults.store().len(), 10);
}
