use domtemple::{impl_model, process, process_each};
use serde_json::json;

struct Track {
    title: String,
    minutes: u32,
}

struct Album {
    title: String,
    year: u16,
    tracks: Vec<Track>,
    label: Option<String>,
}

impl_model!(Track { title, minutes });
impl_model!(Album { title, year, tracks, label });

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Placeholder</title></head>
<body>
  <h1 id="title"></h1>
  <p>Released <span class="year"></span> on <span class="label">an unknown label</span></p>
  <ol id="tracks">
    <li class="template"><span class="title"></span> (<span class="minutes"></span> min)</li>
  </ol>
</body>
</html>"#;

fn main() -> Result<(), domtemple::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let album = Album {
        title: "Purple Rain".to_string(),
        year: 1984,
        tracks: vec![
            Track {
                title: "Let's Go Crazy".to_string(),
                minutes: 5,
            },
            Track {
                title: "When Doves Cry".to_string(),
                minutes: 6,
            },
        ],
        label: None,
    };

    println!("{}", process(PAGE, &album)?);

    let cards = process_each(
        r#"<div class="card"><b class="name"></b></div>"#,
        &[json!({ "Name": "bob" }), json!({ "Name": "alice" })],
    )?;
    println!("{}", cards);

    Ok(())
}
