mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_strip_sync::{ChannelValues, transition::ValueTransition};

    #[test]
    fn test_value_transition_u8() {
        let mut transition = ValueTransition::new_u8(0);
        assert_eq!(transition.current(), 0);
        assert_eq!(transition.is_transitioning(), false);
        transition.set(100, Duration::from_millis(100), Instant::from_millis(0));
        assert_eq!(transition.is_transitioning(), true);

        assert!(transition.tick(Instant::from_millis(50)));
        assert_eq!(transition.current(), 50);

        assert!(transition.tick(Instant::from_millis(100)));
        assert_eq!(transition.current(), 100);
        assert_eq!(transition.is_transitioning(), false);
        assert!(!transition.tick(Instant::from_millis(150)));
    }

    #[test]
    fn test_value_transition_immediate() {
        let mut transition = ValueTransition::new_u8(10);
        transition.set(200, Duration::from_millis(0), Instant::from_millis(0));
        assert_eq!(transition.current(), 200);
        assert_eq!(transition.is_transitioning(), false);
    }

    #[test]
    fn test_value_transition_preempted_from_current() {
        let mut transition = ValueTransition::new_u8(0);
        transition.set(200, Duration::from_millis(100), Instant::from_millis(0));
        transition.tick(Instant::from_millis(50));
        assert_eq!(transition.current(), 100);

        transition.set(0, Duration::from_millis(100), Instant::from_millis(50));
        assert_eq!(transition.current(), 100);
        transition.tick(Instant::from_millis(100));
        assert_eq!(transition.current(), 50);
    }

    #[test]
    fn test_value_transition_channels() {
        let from = ChannelValues::new(0, 0, 0, 0, 0);
        let to = ChannelValues::new(255, 255, 255, 255, 255);
        let mut transition = ValueTransition::new_channels(from);
        transition.set(to, Duration::from_millis(100), Instant::from_millis(0));
        assert_eq!(transition.target(), to);

        transition.tick(Instant::from_millis(100));
        assert_eq!(transition.current(), to);
        assert_eq!(transition.target(), to);
        assert_eq!(transition.is_transitioning(), false);
    }
}
