// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OFF header decoding using nom
//!
//! The header keyword is `[ST][N][C][4][n]OFF`. Each prefix is optional but
//! they may only appear in that order, so `CNOFF` is rejected while `NCOFF`
//! is accepted.

use nom::{
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, map, opt},
    sequence::{terminated, tuple},
    IResult,
};

use crate::error::{Error, Result};

/// Optional per-vertex channels announced by the header keyword
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityFlags {
    /// `ST`: texture coordinates follow the other vertex fields
    pub has_texture_coords: bool,
    /// `N`: per-vertex normals
    pub has_normals: bool,
    /// `C`: per-vertex colors
    pub has_colors: bool,
    /// `4`: homogeneous coordinate (x y z w)
    pub has_homogeneous_coord: bool,
    /// `n`: a dimension line follows the header
    pub has_explicit_dimension: bool,
}

impl CapabilityFlags {
    /// Render the flags back into a header keyword, e.g. `NCOFF`
    pub fn keyword(&self) -> String {
        let mut keyword = String::with_capacity(8);
        if self.has_texture_coords {
            keyword.push_str("ST");
        }
        if self.has_normals {
            keyword.push('N');
        }
        if self.has_colors {
            keyword.push('C');
        }
        if self.has_homogeneous_coord {
            keyword.push('4');
        }
        if self.has_explicit_dimension {
            keyword.push('n');
        }
        keyword.push_str("OFF");
        keyword
    }

    /// Field layout of one vertex line under these flags
    pub fn vertex_layout(&self) -> VertexLayout {
        let position = if self.has_homogeneous_coord { 4 } else { 3 };
        let color = if self.has_colors { 3 } else { 0 };
        let normal = if self.has_normals { 3 } else { 0 };
        let texture = if self.has_texture_coords { 2 } else { 0 };

        VertexLayout {
            color_offset: self.has_colors.then_some(position),
            normal_offset: self.has_normals.then_some(position + color),
            texture_offset: self.has_texture_coords.then_some(position + color + normal),
            required: position + color + normal + texture,
        }
    }
}

/// Offsets of each channel within a vertex line
///
/// Fields appear as position, color, normal, texture coordinate. Without the
/// `4` flag this is `x y z [r g b] [nx ny nz] [s t]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    pub color_offset: Option<usize>,
    pub normal_offset: Option<usize>,
    pub texture_offset: Option<usize>,
    /// Minimum number of values a vertex line must carry
    pub required: usize,
}

/// Parse the ordered flag prefixes
fn flags(input: &str) -> IResult<&str, CapabilityFlags> {
    map(
        tuple((
            opt(tag("ST")),
            opt(char('N')),
            opt(char('C')),
            opt(char('4')),
            opt(char('n')),
        )),
        |(st, normals, colors, homogeneous, dimension)| CapabilityFlags {
            has_texture_coords: st.is_some(),
            has_normals: normals.is_some(),
            has_colors: colors.is_some(),
            has_homogeneous_coord: homogeneous.is_some(),
            has_explicit_dimension: dimension.is_some(),
        },
    )(input)
}

/// Parse a complete header keyword: flags followed by `OFF` and nothing else
fn header_keyword(input: &str) -> IResult<&str, CapabilityFlags> {
    all_consuming(terminated(flags, tag("OFF")))(input)
}

/// Decode a header line into capability flags.
///
/// Surrounding whitespace is ignored; anything else besides the keyword is
/// a [`Error::MalformedHeader`]. `line_no` is only used for the error.
pub fn decode_header(line: &str, line_no: usize) -> Result<CapabilityFlags> {
    match header_keyword(line.trim()) {
        Ok((_, flags)) => Ok(flags),
        Err(_) => Err(Error::MalformedHeader {
            line: line_no,
            content: line.to_string(),
        }),
    }
}
