use serde::{Deserialize, Serialize};

/// Face colors passed through to the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppearancePreferences {
    /// Face colors as `#rrggbb` strings, indexed by the palette indices that
    /// object spawns carry.
    pub colors: Vec<String>,
}

impl Default for AppearancePreferences {
    fn default() -> Self {
        Self {
            colors: ["#B90000", "#ffffff", "#FFD500", "#FF5900", "#009B48", "#0045AD"]
                .map(str::to_owned)
                .to_vec(),
        }
    }
}

impl AppearancePreferences {
    /// Returns the color string for a palette index.
    pub fn color(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    /// Returns the RGB components for a palette index, or `None` if the
    /// index is out of range or the color is not a `#rrggbb` string.
    pub fn rgb(&self, index: usize) -> Option<[u8; 3]> {
        parse_hex_color(self.color(index)?)
    }
}

fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rgb() {
        let appearance = AppearancePreferences::default();
        assert_eq!(appearance.rgb(0), Some([0xB9, 0, 0]));
        assert_eq!(appearance.rgb(1), Some([0xff; 3]));
        assert_eq!(appearance.rgb(6), None);
        assert_eq!(parse_hex_color("B90000"), None);
        assert_eq!(parse_hex_color("#B9000"), None);
        assert_eq!(parse_hex_color("#B9000g"), None);
    }
}
