/// Card geometry in page pixels. Columns double the distance between card
/// centers every round; the renderer scales the pixel values down to rows.
pub const CARD_HEIGHT: u32 = 82;
pub const BASE_GAP: u32 = 14;

pub const CARD_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketSide {
    Winners,
    Losers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundLayout {
    pub gap: u32,
    pub offset: u32,
}

pub fn round_layout(round_index: u32) -> RoundLayout {
    // 96 << 24 still fits in u32.
    let center_distance = (CARD_HEIGHT + BASE_GAP) * (1u32 << round_index.min(24));
    RoundLayout {
        gap: center_distance.saturating_sub(CARD_HEIGHT).max(BASE_GAP),
        offset: (center_distance / 2).saturating_sub(CARD_HEIGHT / 2),
    }
}

/// Losers columns space one step tighter from the second round on; the
/// promotion round tightens once more.
pub fn layout_round_index(side: BracketSide, round_index: usize, round_key: &str) -> usize {
    let mut layout_index = round_index;
    if side == BracketSide::Losers && round_index > 0 {
        layout_index = round_index - 1;
    }
    if round_key == "losers_grand_final" && layout_index > 0 {
        layout_index -= 1;
    }
    layout_index
}

// Same gap as the predecessor, pushed down by half a card-plus-gap.
pub fn centered_final_layout(previous: RoundLayout) -> RoundLayout {
    RoundLayout {
        gap: previous.gap,
        offset: previous.offset + (CARD_HEIGHT + previous.gap) / 2,
    }
}

pub fn px_to_rows(px: u32) -> u16 {
    let rows = (px as u64 * CARD_ROWS as u64 + (CARD_HEIGHT / 2) as u64) / CARD_HEIGHT as u64;
    rows.min(u16::MAX as u64) as u16
}
