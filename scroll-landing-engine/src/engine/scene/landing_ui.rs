use bevy::prelude::*;

use crate::constants::render_settings::{
    HEADER_HEIGHT, OVERLAY_MARGIN, SECTION_BACKGROUND_ALPHA, SECTION_PADDING,
};
use crate::engine::assets::landing_manifest::LandingManifest;
use crate::engine::assets::sections::SectionList;
use crate::engine::navigation::events::SectionChangedEvent;
use crate::engine::navigation::scroll_container::{ScrollContainer, ScrollSurface};

/// Column holding every section panel; shifted by the container offset.
#[derive(Component)]
pub struct SectionColumn;

#[derive(Component)]
pub struct SectionCounterText;

#[derive(Component)]
pub struct SkipButton;

/// Overlay controls that disappear once the last section is reached.
#[derive(Component)]
pub struct HiddenOnFinalSection;

/// CSS named colours the manifest may use for section backgrounds.
const NAMED_COLOURS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("purple", [128, 0, 128]),
    ("orange", [255, 165, 0]),
    ("gold", [255, 215, 0]),
    ("yellow", [255, 255, 0]),
    ("pink", [255, 192, 203]),
    ("salmon", [250, 128, 114]),
    ("coral", [255, 127, 80]),
    ("lightcoral", [240, 128, 128]),
    ("lightblue", [173, 216, 230]),
    ("skyblue", [135, 206, 235]),
    ("lightgreen", [144, 238, 144]),
    ("khaki", [240, 230, 140]),
    ("plum", [221, 160, 221]),
    ("lavender", [230, 230, 250]),
];

/// Resolve a colour token: a CSS name from the table or a `#rrggbb` hex.
pub fn parse_colour_token(token: &str) -> Option<Color> {
    let token = token.trim();
    if token.starts_with('#') {
        return Srgba::hex(token).ok().map(Color::from);
    }
    let name = token.to_ascii_lowercase();
    NAMED_COLOURS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, [r, g, b])| Color::srgb_u8(*r, *g, *b))
}

/// Panel background for a section: the token colour, made translucent so the
/// starfield shows through. Unknown tokens fall back to dark grey.
pub fn section_background(token: &str) -> Color {
    let colour = parse_colour_token(token).unwrap_or_else(|| {
        warn!("Unknown section colour '{}', using grey", token);
        Color::srgb(0.2, 0.2, 0.2)
    });
    colour.with_alpha(SECTION_BACKGROUND_ALPHA)
}

/// Section copy is white on the dark green panel and black elsewhere.
pub fn section_text_colour(token: &str) -> Color {
    if token.trim().eq_ignore_ascii_case("green") {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

pub fn counter_label(index: usize, count: usize) -> String {
    format!("{} / {}", index + 1, count)
}

pub fn spawn_landing_ui(
    mut commands: Commands,
    sections: Res<SectionList>,
    manifest: Res<LandingManifest>,
) {
    commands
        .spawn((
            SectionColumn,
            Name::new("SectionColumn"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(HEADER_HEIGHT),
                left: Val::Px(0.0),
                width: Val::Vw(100.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|column| {
            for section in sections.iter() {
                let text_colour = section_text_colour(&section.colour_token);
                column
                    .spawn((
                        Name::new(format!("Section: {}", section.title)),
                        BackgroundColor(section_background(&section.colour_token)),
                        Node {
                            width: Val::Vw(100.0),
                            height: Val::Vh(100.0),
                            flex_shrink: 0.0,
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::FlexStart,
                            justify_content: JustifyContent::FlexStart,
                            padding: UiRect {
                                top: Val::Px(HEADER_HEIGHT + SECTION_PADDING),
                                left: Val::Px(SECTION_PADDING),
                                ..default()
                            },
                            row_gap: Val::Px(16.0),
                            ..default()
                        },
                    ))
                    .with_children(|panel| {
                        panel.spawn((
                            Text::new(section.title.clone()),
                            TextFont {
                                font_size: 32.0,
                                ..default()
                            },
                            TextColor(text_colour),
                        ));
                        panel.spawn((
                            Text::new(section.description.clone()),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(text_colour),
                            Node {
                                max_width: Val::Px(600.0),
                                ..default()
                            },
                        ));
                    });
            }
        });

    // Header is spawned after the column so it draws on top of it.
    commands
        .spawn((
            Name::new("Header"),
            BackgroundColor(Color::srgb_u8(0x33, 0x33, 0x33)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(HEADER_HEIGHT),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|header| {
            header.spawn((
                Text::new(manifest.header_title.clone()),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });

    let single_section = sections.len() <= 1;
    let overlay_visibility = if single_section {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };

    commands
        .spawn((
            SectionCounterText,
            HiddenOnFinalSection,
            Name::new("SectionCounter"),
            Text::new(counter_label(0, sections.len())),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::WHITE),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            BorderRadius::all(Val::Px(5.0)),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(OVERLAY_MARGIN),
                left: Val::Px(OVERLAY_MARGIN),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                ..default()
            },
            overlay_visibility,
        ));

    commands
        .spawn((
            SkipButton,
            HiddenOnFinalSection,
            Button,
            Name::new("SkipButton"),
            BackgroundColor(Color::BLACK),
            BorderRadius::all(Val::Px(5.0)),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(OVERLAY_MARGIN),
                right: Val::Px(OVERLAY_MARGIN),
                padding: UiRect::axes(Val::Px(16.0), Val::Px(10.0)),
                ..default()
            },
            overlay_visibility,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new("Skip"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });

    info!("Landing UI spawned with {} sections", sections.len());
}

/// Shift the section column to follow the container offset.
pub fn update_section_scroll(
    container: Res<ScrollContainer>,
    mut columns: Query<&mut Node, With<SectionColumn>>,
) {
    if !container.is_changed() {
        return;
    }
    for mut node in &mut columns {
        node.top = Val::Px(HEADER_HEIGHT - container.scroll_top());
    }
}

pub fn update_section_overlays(
    mut changes: EventReader<SectionChangedEvent>,
    mut counters: Query<&mut Text, With<SectionCounterText>>,
    mut hidden_on_final: Query<&mut Visibility, With<HiddenOnFinalSection>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };

    for mut text in &mut counters {
        text.0 = counter_label(change.index, change.count);
    }

    let visibility = if change.is_final {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };
    for mut current in &mut hidden_on_final {
        *current = visibility;
    }
}
