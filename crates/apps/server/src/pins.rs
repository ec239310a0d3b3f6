use std::path::Path;

use anyhow::{Context, bail};
use foundation::Pin;

pub async fn load_pins(path: &Path) -> anyhow::Result<Vec<Pin>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading pins from {}", path.display()))?;
    parse_pins(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_pins(raw: &str) -> anyhow::Result<Vec<Pin>> {
    let pins: Vec<Pin> =
        serde_json::from_str(raw).context("expected a JSON array of positions")?;
    for (index, pin) in pins.iter().enumerate() {
        if !pin.position.is_valid() {
            bail!("pin {index} is out of range: {},{}", pin.lat(), pin.lng());
        }
    }
    Ok(pins)
}

#[cfg(test)]
mod tests {
    use super::parse_pins;
    use foundation::Pin;

    #[test]
    fn parses_both_position_shapes() {
        let pins = parse_pins(r#"[{"lat": 48.7, "lng": 9.1}, [52.5, 13.4]]"#).unwrap();
        assert_eq!(pins, vec![Pin::new(48.7, 9.1), Pin::new(52.5, 13.4)]);
    }

    #[test]
    fn empty_file_content_is_an_empty_list() {
        assert!(parse_pins("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_range_pins() {
        let err = parse_pins(r#"[{"lat": 1, "lng": 2}, {"lat": 91, "lng": 0}]"#).unwrap_err();
        assert!(err.to_string().contains("pin 1"));
    }

    #[test]
    fn rejects_non_arrays() {
        assert!(parse_pins(r#"{"lat": 1, "lng": 2}"#).is_err());
    }
}
