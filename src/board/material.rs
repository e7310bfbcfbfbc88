// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

/// A piece of a specific color, as stored in an occupied cell.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    color: Color,
    symbol: Symbol,
}

impl Material {
    pub const WK: Self = Self::white(King);
    pub const WQ: Self = Self::white(Queen);
    pub const WR: Self = Self::white(Rook);
    pub const WB: Self = Self::white(Bishop);
    pub const WN: Self = Self::white(Knight);
    pub const WP: Self = Self::white(Pawn);

    pub const BK: Self = Self::black(King);
    pub const BQ: Self = Self::black(Queen);
    pub const BR: Self = Self::black(Rook);
    pub const BB: Self = Self::black(Bishop);
    pub const BN: Self = Self::black(Knight);
    pub const BP: Self = Self::black(Pawn);

    #[inline]
    pub const fn new(color: Color, symbol: Symbol) -> Self {
        Self { color, symbol }
    }

    #[inline]
    pub const fn white(symbol: Symbol) -> Self {
        Self::new(White, symbol)
    }

    #[inline]
    pub const fn black(symbol: Symbol) -> Self {
        Self::new(Black, symbol)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Signed cell encoding: the symbol value carrying the color's sign.
    #[inline]
    pub const fn value(&self) -> i32 {
        self.symbol.value() * self.color.value()
    }

    /// Inverse of [`Material::value`]; `None` for anything that is not a
    /// signed piece encoding.
    pub fn from_value(value: i32) -> Option<Self> {
        let color = match value.signum() {
            1 => White,
            -1 => Black,
            _ => return None,
        };
        Symbol::from_value(value.abs()).map(|symbol| Self::new(color, symbol))
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// White is `+1`, black is `-1`; the sign carried by cell values.
    #[inline]
    pub const fn value(&self) -> i32 {
        match self {
            White => 1,
            Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

/// A white value and a black value, indexable by [`Color`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Symbol {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}
use Symbol::{Bishop, King, Knight, Pawn, Queen, Rook};

impl Symbol {
    #[inline]
    pub const fn value(&self) -> i32 {
        *self as i32
    }

    pub const fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(Pawn),
            2 => Some(Knight),
            3 => Some(Bishop),
            4 => Some(Rook),
            5 => Some(Queen),
            6 => Some(King),
            _ => None,
        }
    }

    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
    pub fn is_rook(&self) -> bool {
        matches!(*self, Rook)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }
}
