/// Assert that an observer's scope holds an instance
#[macro_export]
macro_rules! assert_in_scope {
    ($manager:expr, $observer:expr, $id:expr) => {
        assert!(
            $manager.observer_scope(&$observer).has(&$id),
            "Instance {:?} should be in scope of observer {:?}",
            $id,
            $observer
        );
    };
}

/// Assert that an observer's scope does not hold an instance
#[macro_export]
macro_rules! assert_not_in_scope {
    ($manager:expr, $observer:expr, $id:expr) => {
        assert!(
            !$manager.observer_scope(&$observer).has(&$id),
            "Instance {:?} should not be in scope of observer {:?}",
            $id,
            $observer
        );
    };
}
