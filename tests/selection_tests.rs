//! Selection engine behavior: priority ranking, mutual exclusion, user
//! overrides, and change-snapshot semantics.

use audio_device_switch::audio::{AudioDevice, DeviceKind};
use audio_device_switch::system::DeviceListener;

mod test_utils;
use test_utils::{SwitchFixture, bluetooth, wired};

mod priority_selection {
    use super::*;

    #[test]
    fn highest_priority_active_device_wins() {
        let mut fixture = SwitchFixture::new();

        fixture.connect(AudioDevice::Speakerphone);
        assert_eq!(
            fixture.switch.selected_device(),
            Some(&AudioDevice::Speakerphone)
        );

        fixture.connect(bluetooth("AirPods"));
        assert_eq!(fixture.switch.selected_device(), Some(&bluetooth("AirPods")));
    }

    #[test]
    fn default_order_scenario() {
        let mut fixture = SwitchFixture::new();

        fixture.connect(bluetooth("AirPods"));
        fixture.connect(wired());
        fixture.connect(AudioDevice::Earpiece); // rejected while wired present
        fixture.connect(AudioDevice::Speakerphone);

        let kinds: Vec<_> = fixture
            .switch
            .available_devices()
            .iter()
            .map(AudioDevice::kind)
            .collect();
        assert_eq!(
            kinds,
            [
                DeviceKind::BluetoothHeadset,
                DeviceKind::WiredHeadset,
                DeviceKind::Speakerphone,
            ]
        );
        assert_eq!(fixture.switch.selected_device(), Some(&bluetooth("AirPods")));
    }

    #[test]
    fn caller_supplied_order_is_honored() {
        let mut fixture = SwitchFixture::with_preferred(vec![
            DeviceKind::Speakerphone,
            DeviceKind::WiredHeadset,
        ]);

        fixture.connect(bluetooth("AirPods"));
        fixture.connect(AudioDevice::Speakerphone);

        assert_eq!(
            fixture.switch.selected_device(),
            Some(&AudioDevice::Speakerphone)
        );
    }

    #[test]
    fn inactive_devices_are_skipped() {
        let mut fixture = SwitchFixture::new();

        // Connected but no longer reported active by the scanner
        fixture
            .switch
            .on_device_connected(bluetooth("AirPods"))
            .unwrap();
        assert_eq!(fixture.switch.selected_device(), None);

        fixture.connect(AudioDevice::Speakerphone);
        assert_eq!(
            fixture.switch.selected_device(),
            Some(&AudioDevice::Speakerphone)
        );
    }
}

mod wired_headset_exclusion {
    use super::*;

    #[test]
    fn wired_headset_evicts_earpiece() {
        let mut fixture = SwitchFixture::new();

        fixture.connect(AudioDevice::Earpiece);
        assert_eq!(fixture.switch.selected_device(), Some(&AudioDevice::Earpiece));

        fixture.connect(wired());
        let kinds: Vec<_> = fixture
            .switch
            .available_devices()
            .iter()
            .map(AudioDevice::kind)
            .collect();
        assert_eq!(kinds, [DeviceKind::WiredHeadset]);
        assert_eq!(fixture.switch.selected_device(), Some(&wired()));
    }

    #[test]
    fn earpiece_connect_while_wired_present_changes_nothing() {
        let mut fixture = SwitchFixture::new();
        fixture.connect(wired());

        let mut changes = fixture.switch.subscribe();
        changes.borrow_and_update();

        fixture.connect(AudioDevice::Earpiece);

        let kinds: Vec<_> = fixture
            .switch
            .available_devices()
            .iter()
            .map(AudioDevice::kind)
            .collect();
        assert_eq!(kinds, [DeviceKind::WiredHeadset]);
        assert!(!changes.has_changed().unwrap());
    }

    #[test]
    fn wired_disconnect_makes_earpiece_eligible_again() {
        let mut fixture = SwitchFixture::new();
        fixture
            .scanner
            .set_device_active(AudioDevice::Earpiece, true);

        fixture.connect(wired());
        fixture.disconnect(wired());

        let kinds: Vec<_> = fixture
            .switch
            .available_devices()
            .iter()
            .map(AudioDevice::kind)
            .collect();
        assert_eq!(kinds, [DeviceKind::Earpiece]);
        assert_eq!(fixture.switch.selected_device(), Some(&AudioDevice::Earpiece));
    }

    #[test]
    fn earpiece_is_not_readded_without_platform_capability() {
        let mut fixture = SwitchFixture::new();
        fixture.manager.set_earpiece_present(false);

        fixture.connect(wired());
        fixture.disconnect(wired());

        assert!(fixture.switch.available_devices().is_empty());
        assert_eq!(fixture.switch.selected_device(), None);
    }
}

mod user_override {
    use super::*;

    #[test]
    fn override_of_unavailable_device_waits_for_liveness() {
        let mut fixture = SwitchFixture::new();
        fixture.connect(bluetooth("AirPods"));

        // Speakerphone is neither available nor active yet
        fixture
            .switch
            .select_device(Some(AudioDevice::Speakerphone))
            .unwrap();
        assert_eq!(fixture.switch.selected_device(), Some(&bluetooth("AirPods")));

        // Once the scanner reports it active, the override wins over priority
        fixture.connect(AudioDevice::Speakerphone);
        assert_eq!(
            fixture.switch.selected_device(),
            Some(&AudioDevice::Speakerphone)
        );
    }

    #[test]
    fn disconnecting_the_override_clears_it() {
        let mut fixture = SwitchFixture::new();
        fixture.connect(bluetooth("AirPods"));
        fixture.connect(AudioDevice::Speakerphone);

        fixture
            .switch
            .select_device(Some(AudioDevice::Speakerphone))
            .unwrap();
        assert_eq!(
            fixture.switch.selected_device(),
            Some(&AudioDevice::Speakerphone)
        );

        fixture.disconnect(AudioDevice::Speakerphone);
        assert_eq!(fixture.switch.selected_device(), Some(&bluetooth("AirPods")));

        // The override is gone: reconnecting does not re-apply it
        fixture.connect(AudioDevice::Speakerphone);
        assert_eq!(fixture.switch.selected_device(), Some(&bluetooth("AirPods")));
    }

    #[test]
    fn disconnecting_a_different_device_keeps_the_override() {
        let mut fixture = SwitchFixture::new();
        fixture.connect(bluetooth("AirPods"));
        fixture.connect(AudioDevice::Speakerphone);

        fixture
            .switch
            .select_device(Some(AudioDevice::Speakerphone))
            .unwrap();
        fixture.disconnect(bluetooth("AirPods"));

        assert_eq!(
            fixture.switch.selected_device(),
            Some(&AudioDevice::Speakerphone)
        );
    }

    #[test]
    fn clearing_the_override_restores_priority_selection() {
        let mut fixture = SwitchFixture::new();
        fixture.connect(bluetooth("AirPods"));
        fixture.connect(AudioDevice::Speakerphone);

        fixture
            .switch
            .select_device(Some(AudioDevice::Speakerphone))
            .unwrap();
        fixture.switch.select_device(None).unwrap();

        assert_eq!(fixture.switch.selected_device(), Some(&bluetooth("AirPods")));
    }
}

mod change_snapshots {
    use super::*;

    #[test]
    fn duplicate_connect_publishes_nothing() {
        let mut fixture = SwitchFixture::new();
        fixture.connect(bluetooth("AirPods"));

        let mut changes = fixture.switch.subscribe();
        changes.borrow_and_update();

        fixture.connect(bluetooth("AirPods"));
        assert!(!changes.has_changed().unwrap());
    }

    #[test]
    fn membership_change_publishes_even_when_selection_is_stable() {
        let mut fixture = SwitchFixture::new();
        fixture.connect(bluetooth("AirPods"));

        let mut changes = fixture.switch.subscribe();
        changes.borrow_and_update();

        fixture.connect(AudioDevice::Speakerphone);
        assert!(changes.has_changed().unwrap());

        let snapshot = changes.borrow_and_update().clone();
        assert_eq!(snapshot.selected_device, Some(bluetooth("AirPods")));
        assert_eq!(snapshot.audio_devices.len(), 2);
    }

    #[test]
    fn late_subscriber_sees_only_the_latest_snapshot() {
        let mut fixture = SwitchFixture::new();
        fixture.connect(AudioDevice::Earpiece);
        fixture.connect(wired());
        fixture.connect(bluetooth("AirPods"));

        let changes = fixture.switch.subscribe();
        let snapshot = changes.borrow().clone();

        assert_eq!(snapshot.selected_device, Some(bluetooth("AirPods")));
        let kinds: Vec<_> = snapshot.audio_devices.iter().map(AudioDevice::kind).collect();
        assert_eq!(kinds, [DeviceKind::BluetoothHeadset, DeviceKind::WiredHeadset]);
    }

    #[test]
    fn disconnect_of_unknown_device_publishes_nothing() {
        let mut fixture = SwitchFixture::new();
        fixture.connect(bluetooth("AirPods"));

        let mut changes = fixture.switch.subscribe();
        changes.borrow_and_update();

        fixture
            .switch
            .on_device_disconnected(AudioDevice::Speakerphone)
            .unwrap();
        assert!(!changes.has_changed().unwrap());
    }
}
