// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Palette colors.

extern crate alloc;

use alloc::string::String;

use peniko::Color;
use peniko::color::palette::css;

/// Default categorical palette for segments without a color.
const PALETTE: [Color; 8] = [
    css::ROYAL_BLUE,
    css::TOMATO,
    css::MEDIUM_SEA_GREEN,
    css::GOLDENROD,
    css::MEDIUM_PURPLE,
    css::LIGHT_SEA_GREEN,
    css::HOT_PINK,
    css::SLATE_GRAY,
];

/// Returns the palette color for segment `index` as `#rrggbb`.
pub(crate) fn palette_color(index: usize) -> String {
    hex(PALETTE[index % PALETTE.len()])
}

/// Formats a color as `#rrggbb`, ignoring alpha.
pub(crate) fn hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    alloc::format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}
