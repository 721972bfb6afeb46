// Streaming Scanner

/*
 * HAVERSINE BENCH - STREAMING RECORD SCANNER
 * =================================================================
 * Component Name: engine/src/scanner/record_scanner.rs
 * Core Responsibility: استهلاك مصفوفة السجلات مرة واحدة من البداية للنهاية وفك كل سجل فور وصوله (Performance Pillar).
 * Design Pattern: Explicit State Machine / Pull Iterator
 * Forensic Impact: لا تعافي ولا إعادة مزامنة. أول انحراف عن القواعد يوقف التمريرة ويعيد الإزاحة بالبايت،
 *                  ولا يُطبع أي متوسط محسوب على مجموعة ناقصة من السجلات.
 * =================================================================
 */

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};
use crate::error::{HaversineError, HaversineResult};
use crate::geo::haversine::pair_distance;
use crate::models::aggregate::DistanceAggregate;
use crate::models::point::PointPair;
use super::cursor::ByteCursor;
use super::number::read_number;
use super::{FieldTag, RecordSlots, ScanState};

/// حجم مخزن القراءة
const READ_BUFFER_BYTES: usize = 64 * 1024;

/// نتيجة تمريرة مسح كاملة وناجحة
#[derive(Debug, Clone, Copy)]
pub struct ScanSummary {
    pub aggregate: DistanceAggregate,
    /// البايتات المستهلكة حتى القوس `]` الختامي (شاملاً)
    pub bytes_consumed: u64,
}

impl ScanSummary {
    pub fn pairs(&self) -> u64 {
        self.aggregate.count()
    }

    /// المتوسط المرصود (EmptyAggregate عند صفر سجلات)
    pub fn mean(&self) -> HaversineResult<f64> {
        self.aggregate.mean()
    }
}

/// الماسح المتدفق. يسحب السجلات واحداً تلو الآخر عبر `next_pair`.
pub struct RecordScanner<R> {
    cursor: ByteCursor<R>,
    state: ScanState,
    slots: RecordSlots,
    records: u64,
}

impl<R: BufRead> RecordScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            cursor: ByteCursor::new(reader),
            state: ScanState::ExpectOpenBrace,
            slots: RecordSlots::new(),
            records: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn offset(&self) -> u64 {
        self.cursor.offset()
    }

    /// عدد السجلات المفكوكة بنجاح حتى الآن
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Advances the state machine until one complete record is decoded
    /// (`Ok(Some)`), the array closes (`Ok(None)`), or the input violates the
    /// grammar (`Err`). After an error the scanner is fused and keeps
    /// returning `Ok(None)`; callers must not treat that as a clean end.
    pub fn next_pair(&mut self) -> HaversineResult<Option<PointPair>> {
        match self.step_until_record() {
            Ok(pair) => Ok(pair),
            Err(e) => {
                debug!(
                    "SCANNER: Failed in state {:?} at byte {}: {}",
                    self.state,
                    self.cursor.offset(),
                    e
                );
                self.state = ScanState::Failed;
                Err(e)
            }
        }
    }

    fn step_until_record(&mut self) -> HaversineResult<Option<PointPair>> {
        loop {
            match self.state {
                // ---------------------------------------------------------
                // الرأس: { "pairs" : [
                // ---------------------------------------------------------
                ScanState::ExpectOpenBrace => {
                    self.cursor.expect_literal("{")?;
                    self.state = ScanState::ExpectPairsKey;
                }
                ScanState::ExpectPairsKey => {
                    self.cursor.expect_literal("\"pairs\"")?;
                    self.state = ScanState::ExpectColon;
                }
                ScanState::ExpectColon => {
                    self.cursor.expect_literal(":")?;
                    self.state = ScanState::ExpectOpenBracket;
                }
                ScanState::ExpectOpenBracket => {
                    self.cursor.expect_literal("[")?;
                    self.state = ScanState::ExpectObjectOrClose;
                }

                // ---------------------------------------------------------
                // بداية كائن (أو مصفوفة فارغة)
                // ---------------------------------------------------------
                ScanState::ExpectObjectOrClose => {
                    self.cursor.skip_whitespace()?;
                    let at = self.cursor.offset();
                    match self.cursor.bump()? {
                        Some(b'{') => self.begin_object(),
                        Some(b']') => self.state = ScanState::Done,
                        Some(b) => {
                            return Err(HaversineError::UnexpectedCharacter {
                                found: b as char,
                                expected: "'{' or ']'",
                                offset: at,
                            })
                        }
                        None => {
                            return Err(HaversineError::UnexpectedEof {
                                expected: "'{' or ']'",
                                offset: at,
                            })
                        }
                    }
                }
                ScanState::ExpectObject => {
                    self.cursor.expect_literal("{")?;
                    self.begin_object();
                }

                // ---------------------------------------------------------
                // الحقول: "xy" : number
                // ---------------------------------------------------------
                ScanState::ExpectFieldName => {
                    self.cursor.expect_literal("\"")?;
                    let at = self.cursor.offset();
                    let token = self.cursor.take_array::<2>("field name")?;
                    let tag = FieldTag::from_token(token).ok_or_else(|| {
                        HaversineError::UnknownField {
                            name: String::from_utf8_lossy(&token).into_owned(),
                            offset: at,
                        }
                    })?;
                    if self.slots.has(tag) {
                        return Err(HaversineError::DuplicateField {
                            field: tag.name(),
                            offset: at,
                        });
                    }
                    self.cursor.expect_raw(b'"', "\"")?;
                    self.state = ScanState::ExpectFieldColon(tag);
                }
                ScanState::ExpectFieldColon(tag) => {
                    self.cursor.expect_literal(":")?;
                    self.state = ScanState::ExpectNumber(tag);
                }
                ScanState::ExpectNumber(tag) => {
                    let value = read_number(&mut self.cursor)?;
                    self.slots.set(tag, value);
                    self.state = ScanState::ExpectCommaOrCloseBrace;
                }
                ScanState::ExpectCommaOrCloseBrace => {
                    self.cursor.skip_whitespace()?;
                    let at = self.cursor.offset();
                    match self.cursor.bump()? {
                        Some(b',') => self.state = ScanState::ExpectFieldName,
                        Some(b'}') => {
                            let pair = self.slots.finish().map_err(|missing| {
                                HaversineError::MissingField { field: missing.name(), offset: at }
                            })?;
                            self.records += 1;
                            self.state = ScanState::ExpectCommaOrCloseBracket;
                            return Ok(Some(pair));
                        }
                        Some(b) => {
                            return Err(HaversineError::UnexpectedCharacter {
                                found: b as char,
                                expected: "',' or '}'",
                                offset: at,
                            })
                        }
                        None => {
                            return Err(HaversineError::UnexpectedEof {
                                expected: "',' or '}'",
                                offset: at,
                            })
                        }
                    }
                }

                // ---------------------------------------------------------
                // بين الكائنات
                // ---------------------------------------------------------
                ScanState::ExpectCommaOrCloseBracket => {
                    self.cursor.skip_whitespace()?;
                    let at = self.cursor.offset();
                    match self.cursor.bump()? {
                        Some(b',') => self.state = ScanState::ExpectObject,
                        Some(b']') => self.state = ScanState::Done,
                        Some(b) => {
                            return Err(HaversineError::UnexpectedCharacter {
                                found: b as char,
                                expected: "',' or ']'",
                                offset: at,
                            })
                        }
                        None => {
                            return Err(HaversineError::UnexpectedEof {
                                expected: "',' or ']'",
                                offset: at,
                            })
                        }
                    }
                }

                ScanState::Done | ScanState::Failed => return Ok(None),
            }
        }
    }

    #[inline]
    fn begin_object(&mut self) {
        self.slots.reset();
        self.state = ScanState::ExpectFieldName;
    }
}

impl<R: BufRead> Iterator for RecordScanner<R> {
    type Item = HaversineResult<PointPair>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_pair().transpose()
    }
}

// =================================================================
// واجهة التمريرة الكاملة (Full Pass API)
// =================================================================

/// Scans one record array and aggregates every record into the mean
/// haversine distance. Either the whole array is consumed and a summary is
/// returned, or the first grammar violation is returned as an error.
pub fn scan_pairs<R: BufRead>(reader: R, earth_radius: f64) -> HaversineResult<ScanSummary> {
    let mut scanner = RecordScanner::new(reader);
    let mut aggregate = DistanceAggregate::new();

    while let Some(pair) = scanner.next_pair()? {
        aggregate.push(pair_distance(&pair, earth_radius));
    }

    let summary = ScanSummary { aggregate, bytes_consumed: scanner.offset() };
    info!("SCANNER: Decoded {} pairs from {} bytes", summary.pairs(), summary.bytes_consumed);
    Ok(summary)
}

/// فتح ملف ومسحه. فشل الفتح = FileOpen
pub fn scan_file(path: &Path, earth_radius: f64) -> HaversineResult<ScanSummary> {
    let reader = open_input(path)?;
    scan_pairs(reader, earth_radius)
}

/// فتح ملف الإدخال بمخزن قراءة
pub fn open_input(path: &Path) -> HaversineResult<BufReader<File>> {
    let file = File::open(path).map_err(|source| HaversineError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::with_capacity(READ_BUFFER_BYTES, file))
}
