use bevy::prelude::*;

pub mod info;

use crate::systems::bodies::BodyId;
use crate::systems::camera::{ViewMode, ViewModeSelected};
use crate::systems::mission::{LaunchRequested, LaunchSequence};
use crate::systems::navigation::{BodySelected, Navigation};
use crate::systems::time::SimClock;
use crate::systems::SimSet;

pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_ui)
            .add_systems(
                Update,
                (launch_button, view_buttons, body_buttons, info_button).in_set(SimSet::Input),
            )
            .add_systems(
                Update,
                (sync_panel, paint_buttons, update_clock).in_set(SimSet::Ui),
            );
    }
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.25, 0.32);
const BUTTON_ACTIVE: Color = Color::srgb(0.2, 0.4, 0.7);
const BUTTON_DISABLED: Color = Color::srgb(0.3, 0.3, 0.3);

#[derive(Component)]
pub struct LaunchButton;

#[derive(Component)]
pub struct CountdownBanner;

// hidden until shortly after launch
#[derive(Component)]
pub struct ControlsPanel;

// hidden until orbit is reached
#[derive(Component)]
pub struct SelectorRow;

#[derive(Component)]
pub struct ViewButton(pub ViewMode);

#[derive(Component)]
pub struct BodyButton(pub BodyId);

#[derive(Component)]
pub struct InfoButton;

#[derive(Component)]
pub struct InfoTitle;

#[derive(Component)]
pub struct InfoText;

#[derive(Component)]
pub struct ClockDisplay;

fn label(text: impl Into<String>, size: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

fn button(marker: impl Bundle, text: impl Into<String>) -> impl Bundle {
    (
        Button,
        Node {
            padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
            ..default()
        },
        BackgroundColor(BUTTON_IDLE),
        marker,
        children![label(text, 14.0)],
    )
}

fn row(marker: impl Bundle) -> impl Bundle {
    (
        Node {
            flex_direction: FlexDirection::Row,
            column_gap: Val::Px(4.0),
            margin: UiRect::top(Val::Px(5.0)),
            ..default()
        },
        marker,
    )
}

fn setup_ui(mut commands: Commands) {
    // create UI container
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Start,
                justify_content: JustifyContent::Start,
                padding: UiRect::all(Val::Px(20.0)),
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::NONE),
        ))
        .with_children(|parent| {
            parent.spawn(button(LaunchButton, "Launch"));
            parent.spawn((label("", 32.0), CountdownBanner));

            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        display: Display::None,
                        ..default()
                    },
                    ControlsPanel,
                ))
                .with_children(|controls| {
                    controls.spawn(row(SelectorRow)).with_children(|views| {
                        for mode in ViewMode::ALL {
                            views.spawn(button(ViewButton(mode), mode.label()));
                        }
                    });

                    controls.spawn(row(SelectorRow)).with_children(|bodies| {
                        for id in BodyId::all() {
                            bodies.spawn(button(BodyButton(id), id.body().name));
                        }
                    });

                    controls.spawn(row(())).with_children(|info| {
                        info.spawn(button(InfoButton, "Info"));
                    });

                    controls.spawn((label("", 18.0), InfoTitle));
                    controls.spawn((label("", 14.0), InfoText));
                });

            // display planetary clock
            parent.spawn((label("Clock: Loading...", 14.0), ClockDisplay));
        });
}

fn launch_button(
    query: Query<&Interaction, (Changed<Interaction>, With<LaunchButton>)>,
    mut launch: EventWriter<LaunchRequested>,
) {
    if query.iter().any(|interaction| *interaction == Interaction::Pressed) {
        launch.write(LaunchRequested);
    }
}

fn view_buttons(
    query: Query<(&Interaction, &ViewButton), Changed<Interaction>>,
    mut views: EventWriter<ViewModeSelected>,
) {
    for (interaction, ViewButton(mode)) in query.iter() {
        if *interaction == Interaction::Pressed {
            views.write(ViewModeSelected(*mode));
        }
    }
}

fn body_buttons(
    query: Query<(&Interaction, &BodyButton), Changed<Interaction>>,
    mut bodies: EventWriter<BodySelected>,
) {
    for (interaction, BodyButton(id)) in query.iter() {
        if *interaction == Interaction::Pressed {
            bodies.write(BodySelected(id.body().name.to_string()));
        }
    }
}

// show name and distance of the focused body
fn info_button(
    query: Query<&Interaction, (Changed<Interaction>, With<InfoButton>)>,
    nav: Res<Navigation>,
    mut title_query: Query<&mut Text, (With<InfoTitle>, Without<InfoText>)>,
    mut text_query: Query<&mut Text, (With<InfoText>, Without<InfoTitle>)>,
) {
    if !query.iter().any(|interaction| *interaction == Interaction::Pressed) {
        return;
    }

    let (title, text) = info::describe(nav.focus());
    if let Ok(mut title_text) = title_query.single_mut() {
        title_text.0 = title;
    }
    if let Ok(mut body_text) = text_query.single_mut() {
        body_text.0 = text;
    }
}

fn display(visible: bool) -> Display {
    if visible { Display::Flex } else { Display::None }
}

// mirror launch sequence state onto the panel
fn sync_panel(
    sequence: Res<LaunchSequence>,
    mut banner_query: Query<&mut Text, With<CountdownBanner>>,
    mut controls_query: Query<&mut Node, (With<ControlsPanel>, Without<SelectorRow>)>,
    mut selector_query: Query<&mut Node, (With<SelectorRow>, Without<ControlsPanel>)>,
) {
    if !sequence.is_changed() {
        return;
    }

    if let Ok(mut banner) = banner_query.single_mut() {
        if banner.0 != sequence.banner {
            banner.0 = sequence.banner.clone();
        }
    }
    if let Ok(mut node) = controls_query.single_mut() {
        node.display = display(sequence.controls_visible);
    }
    for mut node in selector_query.iter_mut() {
        node.display = display(sequence.selectors_unlocked);
    }
}

fn paint_buttons(
    sequence: Res<LaunchSequence>,
    view: Res<ViewMode>,
    nav: Res<Navigation>,
    mut query: Query<(
        &Interaction,
        &mut BackgroundColor,
        Option<&LaunchButton>,
        Option<&ViewButton>,
        Option<&BodyButton>,
    )>,
) {
    for (interaction, mut background, launch, view_button, body_button) in query.iter_mut() {
        let active = view_button.is_some_and(|ViewButton(mode)| *mode == *view)
            || body_button.is_some_and(|BodyButton(id)| nav.highlighted() == Some(*id));

        background.0 = if launch.is_some() && sequence.has_begun() {
            BUTTON_DISABLED
        } else if active {
            BUTTON_ACTIVE
        } else {
            match interaction {
                Interaction::Pressed | Interaction::Hovered => BUTTON_HOVER,
                Interaction::None => BUTTON_IDLE,
            }
        };
    }
}

// update the clock display
fn update_clock(clock: Res<SimClock>, mut text_query: Query<&mut Text, With<ClockDisplay>>) {
    if let Ok(mut text) = text_query.single_mut() {
        text.0 = clock.readout();
    }
}
