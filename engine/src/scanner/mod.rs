/*
 * HAVERSINE BENCH - STREAMING SCANNER MODULE INTERFACE
 * =================================================================
 * Component Name: engine/src/scanner/mod.rs
 * Core Responsibility: تعريف وسوم الحقول، خانات السجل قيد البناء، وحالات آلة المسح (Parsing Pillar).
 * Design Pattern: Tagged Dispatch / Fixed-Size Slot Table
 * Forensic Impact: مجموعة أسماء الحقول مغلقة: {x0, y0, x1, y1}. أي اسم آخر أو تكرار أو نقص هو خطأ نهائي.
 * =================================================================
 */

pub mod cursor;
pub mod number;
pub mod record_scanner;

pub use cursor::ByteCursor;
pub use record_scanner::{open_input, scan_file, scan_pairs, RecordScanner, ScanSummary};

use crate::models::point::PointPair;

// =================================================================
// وسوم الحقول (Field Tags)
// =================================================================

/// اسم الحقل كوسم مرقّم. الرقم هو فهرس الخانة في `RecordSlots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldTag {
    X0 = 0,
    Y0 = 1,
    X1 = 2,
    Y1 = 3,
}

impl FieldTag {
    pub const ALL: [FieldTag; 4] = [FieldTag::X0, FieldTag::Y0, FieldTag::X1, FieldTag::Y1];

    /// كل أسماء الحقول حرفان بالضبط، لذلك المطابقة على مصفوفة ثابتة
    #[inline]
    pub fn from_token(token: [u8; 2]) -> Option<Self> {
        match &token {
            b"x0" => Some(FieldTag::X0),
            b"y0" => Some(FieldTag::Y0),
            b"x1" => Some(FieldTag::X1),
            b"y1" => Some(FieldTag::Y1),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldTag::X0 => "x0",
            FieldTag::Y0 => "y0",
            FieldTag::X1 => "x1",
            FieldTag::Y1 => "y1",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

// =================================================================
// السجل قيد البناء (Record In Progress)
// =================================================================

/// أربع خانات مفهرسة بالوسم + قناع بتات لما تم ملؤه.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordSlots {
    values: [f64; 4],
    seen: u8,
}

impl RecordSlots {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.seen = 0;
    }

    #[inline]
    pub fn has(&self, tag: FieldTag) -> bool {
        self.seen & (1 << tag.index()) != 0
    }

    #[inline]
    pub fn set(&mut self, tag: FieldTag, value: f64) {
        self.values[tag.index()] = value;
        self.seen |= 1 << tag.index();
    }

    pub fn is_complete(&self) -> bool {
        self.seen == 0b1111
    }

    /// Returns the decoded pair, or the first missing field in `x0, y0, x1, y1` order.
    pub fn finish(&self) -> Result<PointPair, FieldTag> {
        if let Some(missing) = FieldTag::ALL.iter().copied().find(|t| !self.has(*t)) {
            return Err(missing);
        }
        let v = &self.values;
        Ok(PointPair::new(
            v[FieldTag::X0.index()],
            v[FieldTag::Y0.index()],
            v[FieldTag::X1.index()],
            v[FieldTag::Y1.index()],
        ))
    }
}

// =================================================================
// حالات آلة المسح (Scan States)
// =================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    ExpectOpenBrace,
    ExpectPairsKey,
    ExpectColon,
    ExpectOpenBracket,
    /// بعد `[`: كائن أو مصفوفة فارغة
    ExpectObjectOrClose,
    /// بعد `,` بين كائنين: كائن فقط (لا فاصلة زائدة)
    ExpectObject,
    ExpectFieldName,
    ExpectFieldColon(FieldTag),
    ExpectNumber(FieldTag),
    ExpectCommaOrCloseBrace,
    ExpectCommaOrCloseBracket,
    Done,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_dispatch() {
        assert_eq!(FieldTag::from_token(*b"x0"), Some(FieldTag::X0));
        assert_eq!(FieldTag::from_token(*b"y1"), Some(FieldTag::Y1));
        assert_eq!(FieldTag::from_token(*b"x2"), None);
        assert_eq!(FieldTag::from_token(*b"X0"), None);
        for tag in FieldTag::ALL {
            assert_eq!(FieldTag::from_token(tag.name().as_bytes().try_into().unwrap()), Some(tag));
        }
    }

    #[test]
    fn test_slots_complete_in_any_order() {
        let mut slots = RecordSlots::new();
        slots.set(FieldTag::Y1, 4.0);
        slots.set(FieldTag::X1, 3.0);
        assert!(!slots.is_complete());
        assert_eq!(slots.finish(), Err(FieldTag::X0));
        slots.set(FieldTag::X0, 1.0);
        slots.set(FieldTag::Y0, 2.0);
        assert!(slots.is_complete());
        assert_eq!(slots.finish(), Ok(PointPair::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_reset_clears_presence() {
        let mut slots = RecordSlots::new();
        for tag in FieldTag::ALL {
            slots.set(tag, 1.0);
        }
        slots.reset();
        assert!(!slots.has(FieldTag::X0));
        assert!(slots.finish().is_err());
    }
}
