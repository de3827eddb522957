use crate::systems::bodies::BodyId;

pub const NO_SELECTION_TITLE: &str = "No Planet Selected";
pub const NO_SELECTION_TEXT: &str = "Please select a planet from the list.";

/// Title and body text for the info panel.
pub fn describe(focus: Option<BodyId>) -> (String, String) {
    let Some(id) = focus else {
        return (NO_SELECTION_TITLE.to_string(), NO_SELECTION_TEXT.to_string());
    };

    let body = id.body();
    let mut text = format!("Distance from Sun: {} million km", body.distance);
    for line in body.info {
        text.push('\n');
        text.push_str(line);
    }

    (body.name.to_string(), text)
}
