//! FITS header card formatting.
//!
//! A FITS header is a sequence of 80-byte ASCII cards packed into
//! 2880-byte blocks, terminated by an END card and padded with spaces.
//! Value cards carry the `= ` indicator in bytes 8..10 with fixed-format
//! numeric fields right-justified in the next 20 columns.

/// FITS block size in bytes.
pub const BLOCK_SIZE: usize = 2880;

/// FITS card (keyword record) size in bytes.
pub const CARD_SIZE: usize = 80;

/// Number of cards that fit in a single block.
pub const CARDS_PER_BLOCK: usize = BLOCK_SIZE / CARD_SIZE;

/// Total byte length, in whole blocks, required to hold `num_bytes`.
pub const fn padded_len(num_bytes: usize) -> usize {
    num_bytes.div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}

/// Accumulates header cards and serializes them into FITS header blocks.
pub struct HeaderBuilder {
    cards: Vec<[u8; CARD_SIZE]>,
}

impl HeaderBuilder {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn logical(mut self, keyword: &str, value: bool, comment: &str) -> Self {
        // Fixed format puts the logical value in column 30.
        let field = format!("{:>20}", if value { "T" } else { "F" });
        self.push_value(keyword, &field, comment);
        self
    }

    pub fn integer(mut self, keyword: &str, value: i64, comment: &str) -> Self {
        self.push_value(keyword, &format!("{:>20}", value), comment);
        self
    }

    pub fn float(mut self, keyword: &str, value: f64, comment: &str) -> Self {
        self.push_value(keyword, &format!("{:>20}", format_float(value)), comment);
        self
    }

    pub fn string(mut self, keyword: &str, value: &str, comment: &str) -> Self {
        // String values are quoted, left-justified, minimum 8 characters,
        // with embedded quotes doubled.
        let quoted = format!("'{:<8}'", value.replace('\'', "''"));
        self.push_value(keyword, &quoted, comment);
        self
    }

    pub fn history(mut self, text: &str) -> Self {
        let mut card = [b' '; CARD_SIZE];
        card[..7].copy_from_slice(b"HISTORY");
        write_ascii(&mut card[8..], text);
        self.cards.push(card);
        self
    }

    fn push_value(&mut self, keyword: &str, value_field: &str, comment: &str) {
        let mut card = [b' '; CARD_SIZE];
        write_ascii(&mut card[..8], keyword);
        card[8] = b'=';
        let mut body = String::from(value_field);
        if !comment.is_empty() {
            body.push_str(" / ");
            body.push_str(comment);
        }
        write_ascii(&mut card[10..], &body);
        self.cards.push(card);
    }

    /// Serialize the accumulated cards with the END card appended,
    /// space-padded to a block boundary.
    pub fn finish(self) -> Vec<u8> {
        let total_cards = self.cards.len() + 1;
        let total_bytes = total_cards.div_ceil(CARDS_PER_BLOCK) * BLOCK_SIZE;

        let mut buf = vec![b' '; total_bytes];
        for (i, card) in self.cards.iter().enumerate() {
            buf[i * CARD_SIZE..(i + 1) * CARD_SIZE].copy_from_slice(card);
        }
        let end_offset = self.cards.len() * CARD_SIZE;
        buf[end_offset..end_offset + 3].copy_from_slice(b"END");
        buf
    }
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `text` into `dest`, truncating to fit and replacing bytes outside
/// the printable ASCII range with spaces.
fn write_ascii(dest: &mut [u8], text: &str) {
    for (slot, b) in dest.iter_mut().zip(text.bytes()) {
        *slot = if (0x20..0x7f).contains(&b) { b } else { b' ' };
    }
}

/// Format a float so whole values still read as floating point
/// (e.g. `32768.0` rather than `32768`).
fn format_float(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1.0e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
