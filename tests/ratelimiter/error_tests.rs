// tests/ratelimiter/error_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use window_limiter::{ClockError, RateLimitConfig, RateLimitError, RateLimitStore};

    #[test]
    fn invalid_config_is_reported_before_evaluation() {
        let store = RateLimitStore::new(TestClock::new(0));

        match store.check("client1", &RateLimitConfig::new(0, 10)) {
            Err(RateLimitError::InvalidConfig(reason)) => assert!(reason.contains("window")),
            other => panic!("Expected InvalidConfig, got: {:?}", other),
        }
        match store.check("client1", &RateLimitConfig::new(1_000, 0)) {
            Err(RateLimitError::InvalidConfig(reason)) => assert!(reason.contains("max requests")),
            other => panic!("Expected InvalidConfig, got: {:?}", other),
        }

        assert!(store.is_empty());
    }

    #[test]
    fn invalid_config_leaves_existing_window_alone() {
        let store = RateLimitStore::new(TestClock::new(0));
        let config = RateLimitConfig::new(1_000, 3);

        store.check("client1", &config).unwrap();
        assert!(store.check("client1", &config.with_max_requests(0)).is_err());

        assert_eq!(store.snapshot("client1").unwrap().count(), 1);
    }

    #[test]
    fn clock_error_propagates_in_check() {
        let clock = TestClock::new(0);
        let store = RateLimitStore::new(clock.clone());

        clock.fail_next_call();
        match store.check("client1", &RateLimitConfig::default()) {
            Err(RateLimitError::Clock(ClockError::SystemTimeError)) => {} // Expected
            other => panic!("Expected ClockError, got: {:?}", other),
        }

        // Clock should work again automatically
        assert!(store.check("client1", &RateLimitConfig::default()).unwrap().allowed);
    }

    #[test]
    fn clock_failure_mid_window_keeps_count() {
        let clock = TestClock::new(0);
        let store = RateLimitStore::new(clock.clone());
        let config = RateLimitConfig::new(1_000, 3);

        store.check("client1", &config).unwrap();
        store.check("client2", &config).unwrap();

        clock.fail_next_call();
        assert!(store.check("client1", &config).is_err());

        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot("client1").unwrap().count(), 1);
    }

    #[test]
    fn clock_error_propagates_in_sweep() {
        let clock = TestClock::new(0);
        let store = RateLimitStore::new(clock.clone());

        store.check("client1", &RateLimitConfig::new(10, 1)).unwrap();
        clock.set_time(100);

        clock.fail_next_call();
        assert!(matches!(
            store.sweep_expired(),
            Err(RateLimitError::Clock(_))
        ));
        assert_eq!(store.len(), 1);

        assert_eq!(store.sweep_expired().unwrap(), 1);
    }

    #[test]
    fn error_display_formatting() {
        let invalid = RateLimitError::InvalidConfig("window must be positive");
        assert_eq!(
            invalid.to_string(),
            "invalid rate limit configuration: window must be positive"
        );

        let clock = RateLimitError::from(ClockError::SystemTimeError);
        assert!(clock.to_string().to_lowercase().contains("clock"));

        assert!(
            RateLimitError::RuntimeUnavailable
                .to_string()
                .contains("Tokio runtime")
        );
    }
}
