#[cfg(test)]
mod motion_tests {
    use bcc950::constants::{CTRL_PAN_SPEED, CTRL_TILT_SPEED, CTRL_ZOOM_ABSOLUTE};
    use bcc950::errors::DeviceError;
    use bcc950::testing::MockDevice;
    use bcc950::{MotionController, PositionEstimator};
    use std::sync::{Arc, Mutex, RwLock};
    use std::thread;
    use std::time::Duration;

    const TICK: Duration = Duration::from_millis(1);

    fn setup(device: MockDevice) -> (Arc<Mutex<MockDevice>>, MotionController<MockDevice>) {
        let device = Arc::new(Mutex::new(device));
        let motion = MotionController::new(Arc::clone(&device));
        (device, motion)
    }

    fn calls(device: &Arc<Mutex<MockDevice>>) -> Vec<(u32, i32)> {
        device.lock().unwrap().calls().to_vec()
    }

    #[test]
    fn test_tilt_clamps_direction() {
        let (device, motion) = setup(MockDevice::new());
        motion.tilt(-9, TICK).unwrap();
        assert_eq!(calls(&device), vec![(CTRL_TILT_SPEED, -1), (CTRL_TILT_SPEED, 0)]);
    }

    #[test]
    fn test_combined_move_order() {
        let (device, motion) = setup(MockDevice::new());
        motion.combined_move(1, -1, TICK).unwrap();
        assert_eq!(
            calls(&device),
            vec![
                (CTRL_PAN_SPEED, 1),
                (CTRL_TILT_SPEED, -1),
                (CTRL_PAN_SPEED, 0),
                (CTRL_TILT_SPEED, 0),
            ]
        );
    }

    #[test]
    fn test_combined_move_with_zoom_order_and_estimate() {
        let (device, motion) = setup(MockDevice::new());
        motion
            .combined_move_with_zoom(-1, 1, 700, Duration::from_millis(200))
            .unwrap();
        assert_eq!(
            calls(&device),
            vec![
                (CTRL_PAN_SPEED, -1),
                (CTRL_TILT_SPEED, 1),
                (CTRL_ZOOM_ABSOLUTE, 500),
                (CTRL_PAN_SPEED, 0),
                (CTRL_TILT_SPEED, 0),
            ]
        );

        let position = motion.position();
        assert!((position.pan + 0.2).abs() < 1e-9);
        assert!((position.tilt - 0.2).abs() < 1e-9);
        assert_eq!(position.zoom, 500);
    }

    #[test]
    fn test_zero_direction_still_sends_commands() {
        let (device, motion) = setup(MockDevice::new());
        motion.pan(0, TICK).unwrap();
        assert_eq!(calls(&device), vec![(CTRL_PAN_SPEED, 0), (CTRL_PAN_SPEED, 0)]);
        assert_eq!(motion.position().pan, 0.0);
    }

    #[test]
    fn test_zoom_absolute_single_command() {
        let (device, motion) = setup(MockDevice::new());
        motion.zoom_absolute(20).unwrap();
        assert_eq!(calls(&device), vec![(CTRL_ZOOM_ABSOLUTE, 100)]);
        assert_eq!(motion.position().zoom, 100);
    }

    #[test]
    fn test_zoom_relative_from_estimate() {
        let (device, motion) = setup(MockDevice::new());
        motion.zoom_relative(25).unwrap();
        motion.zoom_relative(-10).unwrap();
        assert_eq!(
            calls(&device),
            vec![(CTRL_ZOOM_ABSOLUTE, 125), (CTRL_ZOOM_ABSOLUTE, 115)]
        );
        assert_eq!(motion.position().zoom, 115);
    }

    #[test]
    fn test_failure_leaves_estimate_untouched() {
        let (device, motion) = setup(MockDevice::new().fail_control(CTRL_TILT_SPEED));
        motion.pan(1, TICK).unwrap();
        let before = motion.position();

        let result = motion.combined_move(1, 1, TICK);
        assert!(matches!(result, Err(DeviceError::Backend(_))));
        assert_eq!(motion.position(), before);

        // Pan was started and never stopped: no cleanup on error
        assert_eq!(calls(&device).last(), Some(&(CTRL_PAN_SPEED, 1)));

        // The lock was released: stop reaches the device, then hits the same
        // tilt failure
        assert!(matches!(motion.stop(), Err(DeviceError::Backend(_))));
        assert_eq!(calls(&device).last(), Some(&(CTRL_PAN_SPEED, 0)));

        // Later moves on an unaffected axis still run
        motion.zoom_absolute(200).unwrap();
        assert_eq!(calls(&device).last(), Some(&(CTRL_ZOOM_ABSOLUTE, 200)));
        assert_eq!(motion.position().zoom, 200);
    }

    #[test]
    fn test_closed_device_reports_not_open() {
        let (device, motion) = setup(MockDevice::closed());
        assert!(matches!(motion.zoom_absolute(200), Err(DeviceError::NotOpen)));
        assert!(calls(&device).is_empty());
        assert_eq!(motion.position().zoom, 100);
    }

    #[test]
    fn test_shared_position_handle() {
        let device = Arc::new(Mutex::new(MockDevice::new()));
        let position = Arc::new(RwLock::new(PositionEstimator::new()));
        let motion = MotionController::with_position(device, Arc::clone(&position));

        motion.zoom_absolute(300).unwrap();
        assert_eq!(position.read().unwrap().zoom, 300);
        assert!(Arc::ptr_eq(&motion.position_handle(), &position));
    }

    #[test]
    fn test_set_control_is_raw() {
        let (device, motion) = setup(MockDevice::new());
        motion.set_control(CTRL_ZOOM_ABSOLUTE, 450).unwrap();
        assert_eq!(calls(&device), vec![(CTRL_ZOOM_ABSOLUTE, 450)]);
        assert_eq!(motion.position().zoom, 100);
    }

    #[test]
    fn test_concurrent_moves_do_not_interleave() {
        let (device, motion) = setup(MockDevice::new());
        let motion = Arc::new(motion);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let motion = Arc::clone(&motion);
                thread::spawn(move || {
                    for _ in 0..5 {
                        if i % 2 == 0 {
                            motion.pan(1, Duration::from_millis(2)).unwrap();
                        } else {
                            motion.tilt(-1, Duration::from_millis(2)).unwrap();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let calls = calls(&device);
        assert_eq!(calls.len(), 40);
        for pair in calls.chunks(2) {
            let (start_id, start_speed) = pair[0];
            let (stop_id, stop_speed) = pair[1];
            assert_eq!(start_id, stop_id, "interleaved sequence: {:?}", pair);
            assert_ne!(start_speed, 0);
            assert_eq!(stop_speed, 0);
        }

        let position = motion.position();
        assert!((position.pan - 0.02).abs() < 1e-9);
        assert!((position.tilt + 0.02).abs() < 1e-9);
    }
}
