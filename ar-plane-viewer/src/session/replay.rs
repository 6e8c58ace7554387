use bevy::prelude::*;

use crate::session::config::SessionConfig;
use crate::session::feed::SessionFeed;
use crate::session::script::SessionRecording;

/// Seconds since the session entered its running phase. Kept apart from
/// engine time so tests can position the timeline exactly.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SessionClock {
    pub elapsed: f32,
}

pub fn advance_session_clock(time: Res<Time>, mut clock: ResMut<SessionClock>) {
    clock.elapsed += time.delta_secs();
}

/// Replay position within the active recording.
#[derive(Resource, Debug, Default)]
pub struct ReplayCursor {
    next_entry: usize,
    pub finished: bool,
}

/// Pushes every recording entry whose timestamp the session clock has
/// passed. Entries go through the feed rather than straight into the event
/// stream, so a replay is indistinguishable from a live provider from the
/// consumer side.
pub fn drive_scripted_session(
    recording: Option<Res<SessionRecording>>,
    config: Res<SessionConfig>,
    clock: Res<SessionClock>,
    mut cursor: ResMut<ReplayCursor>,
    feed: Res<SessionFeed>,
) {
    let Some(recording) = recording else {
        return;
    };
    if cursor.finished {
        return;
    }

    while let Some(entry) = recording.entries.get(cursor.next_entry) {
        if entry.at > clock.elapsed {
            break;
        }
        if let Some(message) = entry.event.to_message(config.plane_detection) {
            feed.push(message);
        }
        cursor.next_entry += 1;
    }

    if cursor.next_entry >= recording.entries.len() {
        info!("session replay finished after {:.1}s", recording.duration());
        cursor.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::anchor::{AnchorEvent, TrackingPhase};
    use crate::session::config::PlaneDetection;
    use crate::session::feed::{pump_session_feed, FeatureCloud};
    use crate::session::script::{PlaneRecord, RecordingEntry, RecordingEvent};
    use bevy::ecs::event::EventCursor;

    fn recording() -> SessionRecording {
        let plane = PlaneRecord {
            id: 1,
            position: [1.0, 0.0, -0.5],
            euler_degrees: [0.0, 0.0, 0.0],
            center: [0.0, 0.0, 0.0],
            extent: [0.4, 0.3],
            alignment: Default::default(),
        };
        SessionRecording {
            config: SessionConfig::default(),
            entries: vec![
                RecordingEntry {
                    at: 0.0,
                    event: RecordingEvent::Tracking(TrackingPhase::Initialising),
                },
                RecordingEntry {
                    at: 0.8,
                    event: RecordingEvent::Tracking(TrackingPhase::Normal),
                },
                RecordingEntry {
                    at: 1.5,
                    event: RecordingEvent::PlaneAdded(plane),
                },
            ],
        }
    }

    fn replay_app(recording: SessionRecording) -> App {
        let mut app = App::new();
        app.add_event::<AnchorEvent>()
            .insert_resource(recording.config)
            .insert_resource(recording)
            .init_resource::<SessionClock>()
            .init_resource::<ReplayCursor>()
            .init_resource::<SessionFeed>()
            .init_resource::<TrackingPhase>()
            .init_resource::<FeatureCloud>()
            .add_systems(Update, (drive_scripted_session, pump_session_feed).chain());
        app
    }

    fn set_clock(app: &mut App, elapsed: f32) {
        app.world_mut().resource_mut::<SessionClock>().elapsed = elapsed;
    }

    fn new_events(app: &App, cursor: &mut EventCursor<AnchorEvent>) -> Vec<AnchorEvent> {
        let events = app.world().resource::<Events<AnchorEvent>>();
        cursor.read(events).cloned().collect()
    }

    #[test]
    fn entries_release_as_the_clock_passes_them() {
        let mut app = replay_app(recording());
        let mut cursor = app.world().resource::<Events<AnchorEvent>>().get_cursor();

        set_clock(&mut app, 0.9);
        app.update();
        assert_eq!(
            *app.world().resource::<TrackingPhase>(),
            TrackingPhase::Normal
        );
        assert!(new_events(&app, &mut cursor).is_empty());
        assert!(!app.world().resource::<ReplayCursor>().finished);

        // Same clock, another frame: nothing new is released.
        app.update();
        assert!(new_events(&app, &mut cursor).is_empty());

        set_clock(&mut app, 1.6);
        app.update();
        let events = new_events(&app, &mut cursor);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], AnchorEvent::Added(_)));
        assert!(app.world().resource::<ReplayCursor>().finished);

        app.update();
        assert!(new_events(&app, &mut cursor).is_empty());
    }

    #[test]
    fn detection_none_suppresses_plane_events_but_not_tracking() {
        let mut scripted = recording();
        scripted.config.plane_detection = PlaneDetection::None;
        let mut app = replay_app(scripted);
        let mut cursor = app.world().resource::<Events<AnchorEvent>>().get_cursor();

        set_clock(&mut app, 5.0);
        app.update();
        assert!(new_events(&app, &mut cursor).is_empty());
        assert_eq!(
            *app.world().resource::<TrackingPhase>(),
            TrackingPhase::Normal
        );
    }

    #[test]
    fn clock_accumulates_engine_time() {
        let mut app = App::new();
        let mut time = Time::default();
        time.advance_by(Duration::from_millis(250));
        app.insert_resource(time)
            .init_resource::<SessionClock>()
            .add_systems(Update, advance_session_clock);

        app.update();
        app.update();
        let elapsed = app.world().resource::<SessionClock>().elapsed;
        assert!((elapsed - 0.5).abs() < 1e-6);
    }
}
