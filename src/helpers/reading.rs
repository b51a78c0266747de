//! Reading time estimation

use crate::content::ContentBlock;

/// Assumed reading speed
const WORDS_PER_MINUTE: usize = 200;

/// Count whitespace-separated words in a plain text string.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimate reading time in whole minutes across all content blocks.
///
/// Word counts from each block's body sum before dividing by 200 and
/// rounding up. Empty content reports the documented minimum of 1 minute.
pub fn reading_minutes(blocks: &[ContentBlock]) -> usize {
    let words: usize = blocks
        .iter()
        .map(|block| count_words(&block.body.as_text()))
        .sum();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{RichText, RichTextNode};

    fn block_of(words: usize) -> ContentBlock {
        let text = vec!["word"; words].join(" ");
        ContentBlock {
            heading: "h".into(),
            body: RichText(vec![RichTextNode::Paragraph { text }]),
        }
    }

    #[test]
    fn four_hundred_fifty_words_is_three_minutes() {
        assert_eq!(reading_minutes(&[block_of(450)]), 3);
    }

    #[test]
    fn words_sum_across_blocks_before_dividing() {
        // 150 + 150 = 300 -> 2 minutes; per-block ceiling would give 1 + 1
        assert_eq!(reading_minutes(&[block_of(150), block_of(150)]), 2);
    }

    #[test]
    fn empty_content_reports_the_one_minute_minimum() {
        assert_eq!(reading_minutes(&[]), 1);
        assert_eq!(reading_minutes(&[block_of(0)]), 1);
    }

    #[test]
    fn monotonically_non_decreasing_in_word_count() {
        let mut last = 0;
        for words in [1, 199, 200, 201, 400, 401, 1000] {
            let minutes = reading_minutes(&[block_of(words)]);
            assert!(minutes >= last, "{words} words regressed");
            last = minutes;
        }
    }

    #[test]
    fn exact_multiples_do_not_round_up() {
        assert_eq!(reading_minutes(&[block_of(200)]), 1);
        assert_eq!(reading_minutes(&[block_of(400)]), 2);
    }
}
