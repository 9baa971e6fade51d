use kdeploy_core::extract_version;
use serde::Serialize;

#[derive(Serialize)]
struct VersionReport<'a> {
    image: &'a str,
    current: &'a str,
    next: &'a str,
    source: &'static str,
    well_formed: bool,
}

pub fn next_version(image: &str, json: bool) -> anyhow::Result<()> {
    let resolved = extract_version(image);

    if json {
        let report = VersionReport {
            image,
            current: &resolved.current,
            next: &resolved.next,
            source: resolved.source.as_str(),
            well_formed: resolved.source.is_well_formed(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Current version: {}", resolved.current);
        println!("Next version:    {}", resolved.next);
        println!("Status:          {}", resolved.source);
    }

    Ok(())
}
