use std::collections::HashMap;
use std::sync::OnceLock;

use palette::white_point::D65;
use palette::{FromColor, Lch, Srgb};

use crate::engine::Card;

/// Highest exponent that gets its own hue; anything larger falls back to `LARGE_CARD`.
const MAX_EXPONENT: u32 = 17;
const BG_HUE: f32 = 28.0;

const EMPTY_SLOT: (Rgb, Rgb) = (Rgb(60, 58, 50), Rgb(120, 116, 100));
const LARGE_CARD: (Rgb, Rgb) = (Rgb(255, 255, 255), Rgb(90, 0, 0));

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Rgb(pub(crate) u8, pub(crate) u8, pub(crate) u8);

impl Rgb {
    #[inline(always)]
    pub(crate) fn r(&self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub(crate) fn g(&self) -> u8 {
        self.1
    }

    #[inline(always)]
    pub(crate) fn b(&self) -> u8 {
        self.2
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Rgb {
        Rgb(c.red, c.green, c.blue)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(f: Rgb) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: f.r(),
            g: f.g(),
            b: f.b(),
        }
    }
}

static CARD_COLORS: OnceLock<HashMap<Card, (Rgb, Rgb)>> = OnceLock::new();

fn card_colors() -> &'static HashMap<Card, (Rgb, Rgb)> {
    CARD_COLORS.get_or_init(|| {
        let fg_hue = BG_HUE + 180.0;
        (1..=MAX_EXPONENT)
            .map(|i| {
                let hue = BG_HUE + i as f32 * 360.0 / 11.0;
                let bg = Lch::<D65, f32>::new(80.0, 90.0, hue);
                let fg = Lch::<D65, f32>::new(20.0, 50.0, fg_hue);
                (
                    2u32.pow(i),
                    (
                        Rgb::from(Srgb::<f32>::from_color(bg).into_format::<u8>()),
                        Rgb::from(Srgb::<f32>::from_color(fg).into_format::<u8>()),
                    ),
                )
            })
            .collect()
    })
}

/// Background and foreground colors for a card; 0 gets the empty slot colors.
#[inline(always)]
pub(crate) fn colors_from_value(value: Card) -> (Rgb, Rgb) {
    if value == 0 {
        return EMPTY_SLOT;
    }
    *card_colors().get(&value).unwrap_or(&LARGE_CARD)
}
