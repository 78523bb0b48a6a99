use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::constants::navigation_settings::WHEEL_LINE_HEIGHT_PX;
use crate::engine::navigation::events::{
    ContainerScrolled, SectionChangedEvent, SeekRequestEvent, SeekSource, SeekTarget,
};
use crate::engine::navigation::scroll_container::{ScrollContainer, ScrollSurface};
use crate::engine::navigation::section_navigator::SectionNavigator;
use crate::engine::scene::landing_ui::SkipButton;
use crate::rpc::web_rpc::WebRpcInterface;

/// Convert a wheel event into a pixel delta in scroll direction (positive
/// scrolls the content up, towards later sections).
pub fn wheel_scroll_delta(unit: MouseScrollUnit, y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => -y * WHEEL_LINE_HEIGHT_PX,
        MouseScrollUnit::Pixel => -y,
    }
}

/// Track primary window resizes. Only future snap computations change; a seek
/// in flight keeps its target.
pub fn handle_window_resize(
    mut resize_events: EventReader<WindowResized>,
    primary_window: Query<Entity, With<PrimaryWindow>>,
    mut navigator: ResMut<SectionNavigator>,
    mut container: ResMut<ScrollContainer>,
) {
    let Ok(primary) = primary_window.single() else {
        return;
    };

    let Some(latest) = resize_events
        .read()
        .filter(|event| event.window == primary)
        .last()
    else {
        return;
    };

    navigator.on_resize(latest.height);
    container.resize(latest.height);
    debug!("Viewport resized to {}x{}", latest.width, latest.height);
}

/// Wheel input scrolls the container directly; the navigator sees the
/// resulting offsets through `ContainerScrolled`.
pub fn handle_wheel_scroll(
    mut wheel_events: EventReader<MouseWheel>,
    mut container: ResMut<ScrollContainer>,
    mut scrolled: EventWriter<ContainerScrolled>,
) {
    for event in wheel_events.read() {
        if container.scroll_by(wheel_scroll_delta(event.unit, event.y)) {
            scrolled.write(ContainerScrolled {
                scroll_top: container.scroll_top(),
            });
        }
    }
}

/// One swipe moves exactly one section. Only the first finger down is tracked.
pub fn handle_touch_swipes(
    mut touch_events: EventReader<TouchInput>,
    mut tracked_touch: Local<Option<u64>>,
    time: Res<Time>,
    mut navigator: ResMut<SectionNavigator>,
    mut container: ResMut<ScrollContainer>,
) {
    for touch in touch_events.read() {
        match touch.phase {
            TouchPhase::Started => {
                if tracked_touch.is_none() {
                    *tracked_touch = Some(touch.id);
                    navigator.on_touch_start(touch.position.y);
                }
            }
            TouchPhase::Ended if *tracked_touch == Some(touch.id) => {
                *tracked_touch = None;
                if let Some(index) =
                    navigator.on_touch_end(touch.position.y, time.elapsed(), &mut *container)
                {
                    debug!("Swipe landed on section {}", index + 1);
                }
            }
            TouchPhase::Canceled if *tracked_touch == Some(touch.id) => {
                *tracked_touch = None;
                navigator.on_touch_cancel();
            }
            _ => {}
        }
    }
}

/// Section seek bound to `key`, if any.
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
pub fn shortcut_target(key: KeyCode) -> Option<SeekTarget> {
    match key {
        KeyCode::ArrowDown | KeyCode::PageDown => Some(SeekTarget::Next),
        KeyCode::ArrowUp | KeyCode::PageUp => Some(SeekTarget::Previous),
        KeyCode::Home => Some(SeekTarget::Index(0)),
        KeyCode::End => Some(SeekTarget::Final),
        _ => None,
    }
}

/// Keyboard section shortcuts. Conditionally disable keyboard input during
/// WASM compilation; the host page owns the keyboard there.
pub fn handle_navigation_shortcuts(
    #[cfg(not(target_arch = "wasm32"))] keyboard: Res<ButtonInput<KeyCode>>,
    #[cfg(not(target_arch = "wasm32"))] mut seek_events: EventWriter<SeekRequestEvent>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        for target in keyboard.get_just_pressed().copied().filter_map(shortcut_target) {
            seek_events.write(SeekRequestEvent {
                target,
                source: SeekSource::Keyboard,
            });
        }
    }
}

pub fn handle_skip_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<SkipButton>)>,
    mut seek_events: EventWriter<SeekRequestEvent>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            seek_events.write(SeekRequestEvent {
                target: SeekTarget::Final,
                source: SeekSource::SkipButton,
            });
        }
    }
}

/// Resolve seek requests against the navigator in arrival order.
pub fn apply_seek_requests(
    mut seek_events: EventReader<SeekRequestEvent>,
    time: Res<Time>,
    mut navigator: ResMut<SectionNavigator>,
    mut container: ResMut<ScrollContainer>,
) {
    let now = time.elapsed();
    for request in seek_events.read() {
        let current = navigator.current_index() as isize;
        let landed = match request.target {
            SeekTarget::Index(index) => navigator.seek_to(index, now, &mut *container),
            SeekTarget::Next => navigator.seek_to(current + 1, now, &mut *container),
            SeekTarget::Previous => navigator.seek_to(current - 1, now, &mut *container),
            SeekTarget::Final => navigator.skip_to_end(now, &mut *container),
        };

        match landed {
            Some(index) => info!(
                "{:?} seek ({:?}) -> section {}/{}",
                request.source,
                request.target,
                index + 1,
                navigator.section_count()
            ),
            None => warn!(
                "{:?} seek ({:?}) ignored: container not ready",
                request.source, request.target
            ),
        }
    }
}

pub fn advance_scroll_container(
    time: Res<Time>,
    mut container: ResMut<ScrollContainer>,
    mut scrolled: EventWriter<ContainerScrolled>,
) {
    if container.advance(time.delta_secs()) {
        scrolled.write(ContainerScrolled {
            scroll_top: container.scroll_top(),
        });
    }
}

/// Feed container offsets to the navigator's debounce.
pub fn dispatch_scroll_events(
    mut scrolled: EventReader<ContainerScrolled>,
    time: Res<Time>,
    mut navigator: ResMut<SectionNavigator>,
) {
    let now = time.elapsed();
    for event in scrolled.read() {
        navigator.on_scroll(now, event.scroll_top);
    }
}

/// Run due snaps and expire the cool-down.
pub fn tick_navigator(
    time: Res<Time>,
    mut navigator: ResMut<SectionNavigator>,
    mut container: ResMut<ScrollContainer>,
) {
    if let Some(index) = navigator.tick(time.elapsed(), &mut *container) {
        debug!("Scroll snapped to section {}", index + 1);
    }
}

pub fn publish_section_changes(
    navigator: Res<SectionNavigator>,
    mut last_published: Local<Option<usize>>,
    mut changes: EventWriter<SectionChangedEvent>,
) {
    let index = navigator.current_index();
    if *last_published == Some(index) {
        return;
    }
    *last_published = Some(index);

    changes.write(SectionChangedEvent {
        index,
        count: navigator.section_count(),
        is_final: navigator.is_final_section(),
    });
}

pub fn notify_section_changes(
    mut changes: EventReader<SectionChangedEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for change in changes.read() {
        rpc_interface.send_notification(
            "section_changed",
            serde_json::json!({
                "index": change.index,
                "count": change.count,
                "is_final": change.is_final
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_down_scrolls_towards_later_sections() {
        assert_eq!(wheel_scroll_delta(MouseScrollUnit::Line, -1.0), WHEEL_LINE_HEIGHT_PX);
        assert_eq!(wheel_scroll_delta(MouseScrollUnit::Pixel, -12.5), 12.5);
        assert_eq!(wheel_scroll_delta(MouseScrollUnit::Pixel, 30.0), -30.0);
    }

    #[test]
    fn shortcut_keys_map_to_section_seeks() {
        assert_eq!(shortcut_target(KeyCode::ArrowDown), Some(SeekTarget::Next));
        assert_eq!(shortcut_target(KeyCode::PageDown), Some(SeekTarget::Next));
        assert_eq!(shortcut_target(KeyCode::ArrowUp), Some(SeekTarget::Previous));
        assert_eq!(shortcut_target(KeyCode::PageUp), Some(SeekTarget::Previous));
        assert_eq!(shortcut_target(KeyCode::Home), Some(SeekTarget::Index(0)));
        assert_eq!(shortcut_target(KeyCode::End), Some(SeekTarget::Final));
        assert_eq!(shortcut_target(KeyCode::Space), None);
    }
}
