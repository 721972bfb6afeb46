// Float Lexer

/*
 * HAVERSINE BENCH - NUMERIC LITERAL READER
 * =================================================================
 * Component Name: engine/src/scanner/number.rs
 * Core Responsibility: التقاط رقم عشري من التدفق إلى مخزن ثابت الحجم على المكدس ثم تحويله إلى f64.
 * Design Pattern: Bounded Stack Buffer (no heap allocation on the hot path)
 * =================================================================
 */

use std::io::BufRead;
use crate::error::{HaversineError, HaversineResult};
use super::cursor::ByteCursor;

/// أقصى طول لرقم واحد. المولد يكتب 3 + 1 + 16 خانة، فهذا هامش واسع.
pub const MAX_NUMBER_LEN: usize = 64;

/// Reads `[+-]digits[.digits][(e|E)[+-]digits]` starting at the next
/// non-whitespace byte and stops at the first byte that cannot continue the
/// literal, leaving it unconsumed.
pub fn read_number<R: BufRead>(cursor: &mut ByteCursor<R>) -> HaversineResult<f64> {
    cursor.skip_whitespace()?;
    let start = cursor.offset();

    let mut buf = [0u8; MAX_NUMBER_LEN];
    let mut len = 0usize;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let mut seen_digit = false;

    while let Some(b) = cursor.peek()? {
        let accept = match b {
            b'0'..=b'9' => {
                seen_digit = true;
                true
            }
            b'+' | b'-' => len == 0 || matches!(buf[len - 1], b'e' | b'E'),
            b'.' => !seen_dot && !seen_exp,
            b'e' | b'E' => seen_digit && !seen_exp,
            _ => false,
        };
        if !accept {
            break;
        }
        if len == MAX_NUMBER_LEN {
            return Err(HaversineError::InvalidNumber {
                literal: String::from_utf8_lossy(&buf).into_owned(),
                offset: start,
            });
        }
        match b {
            b'.' => seen_dot = true,
            b'e' | b'E' => seen_exp = true,
            _ => {}
        }
        buf[len] = b;
        len += 1;
        cursor.bump()?;
    }

    if len == 0 {
        return match cursor.peek()? {
            Some(b) => Err(HaversineError::UnexpectedCharacter {
                found: b as char,
                expected: "number",
                offset: start,
            }),
            None => Err(HaversineError::UnexpectedEof { expected: "number", offset: start }),
        };
    }

    // كل البايتات المقبولة ASCII، لذلك التحويل لا يفشل عملياً
    let text = std::str::from_utf8(&buf[..len]).map_err(|_| HaversineError::InvalidNumber {
        literal: String::from_utf8_lossy(&buf[..len]).into_owned(),
        offset: start,
    })?;

    if !seen_digit {
        return Err(HaversineError::InvalidNumber { literal: text.to_string(), offset: start });
    }

    // 1e400 يُحلَّل إلى inf: نرفضه حتى لا يصل NaN إلى المتوسط
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(HaversineError::InvalidNumber { literal: text.to_string(), offset: start }),
    }
}
