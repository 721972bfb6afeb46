// Byte Cursor

/*
 * HAVERSINE BENCH - STREAMING BYTE CURSOR
 * =================================================================
 * Component Name: engine/src/scanner/cursor.rs
 * Core Responsibility: قراءة التدفق بايتاً بايتاً مع نافذة نظر أمامية من بايت واحد (Performance Pillar).
 * Design Pattern: Peekable Reader over BufRead
 * Forensic Impact: كل خطأ يحمل الإزاحة الدقيقة بالبايت داخل الملف، فيمكن فتح الملف عند الموضع الفاسد مباشرة.
 * =================================================================
 */

use std::io::BufRead;
use crate::error::{HaversineError, HaversineResult};

/// Thin wrapper over a `BufRead` that never holds more than the reader's own
/// buffer and tracks how many bytes have been consumed.
pub struct ByteCursor<R> {
    reader: R,
    offset: u64,
}

impl<R: BufRead> ByteCursor<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }

    /// عدد البايتات المستهلكة حتى الآن (وهو أيضاً موضع البايت التالي)
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// النظر إلى البايت التالي دون استهلاكه
    #[inline]
    pub fn peek(&mut self) -> HaversineResult<Option<u8>> {
        let buf = self.reader.fill_buf()?;
        Ok(buf.first().copied())
    }

    /// استهلاك بايت واحد
    #[inline]
    pub fn bump(&mut self) -> HaversineResult<Option<u8>> {
        let next = self.peek()?;
        if next.is_some() {
            self.reader.consume(1);
            self.offset += 1;
        }
        Ok(next)
    }

    /// تخطي المسافات البيضاء وإرجاع البايت التالي (دون استهلاكه)
    #[inline]
    pub fn skip_whitespace(&mut self) -> HaversineResult<Option<u8>> {
        loop {
            match self.peek()? {
                Some(b) if b.is_ascii_whitespace() => {
                    self.reader.consume(1);
                    self.offset += 1;
                }
                other => return Ok(other),
            }
        }
    }

    /// أول بايت غير أبيض، مستهلَكاً
    #[inline]
    pub fn next_non_ws(&mut self) -> HaversineResult<Option<u8>> {
        self.skip_whitespace()?;
        self.bump()
    }

    /// مطابقة حرفية صارمة بعد تخطي المسافات البيضاء السابقة لها
    pub fn expect_literal(&mut self, literal: &'static str) -> HaversineResult<()> {
        self.skip_whitespace()?;
        for &expected in literal.as_bytes() {
            self.expect_raw(expected, literal)?;
        }
        Ok(())
    }

    /// مطابقة بايت واحد في الموضع الحالي بالضبط (بدون تخطي مسافات)
    #[inline]
    pub fn expect_raw(&mut self, expected: u8, literal: &'static str) -> HaversineResult<()> {
        let at = self.offset;
        match self.bump()? {
            Some(b) if b == expected => Ok(()),
            Some(b) => Err(HaversineError::LiteralMismatch {
                expected: literal.to_string(),
                found: b as char,
                offset: at,
            }),
            None => Err(HaversineError::UnexpectedEof { expected: literal, offset: at }),
        }
    }

    /// قراءة N بايت خام (لرموز أسماء الحقول ثابتة الطول)
    pub fn take_array<const N: usize>(&mut self, what: &'static str) -> HaversineResult<[u8; N]> {
        let mut out = [0u8; N];
        for slot in out.iter_mut() {
            let at = self.offset;
            *slot = self
                .bump()?
                .ok_or(HaversineError::UnexpectedEof { expected: what, offset: at })?;
        }
        Ok(out)
    }
}
