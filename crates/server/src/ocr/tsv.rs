//! Tesseract TSV output parsing

use super::{BoundingBox, TextFragment};

/// TSV level of word rows
const WORD_LEVEL: i32 = 5;

/// Parse Tesseract TSV output into word fragments, in output order.
///
/// Columns: level page_num block_num par_num line_num word_num left top width
/// height conf text. Rows that are not words, or have no text, are skipped.
pub(crate) fn parse_tsv(tsv: &str) -> Vec<TextFragment> {
    let mut fragments = Vec::new();

    for line in tsv.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        // Header row fails to parse here
        let Ok(level) = fields[0].parse::<i32>() else {
            continue;
        };
        if level != WORD_LEVEL {
            continue;
        }

        let word = fields[11].trim();
        if word.is_empty() {
            continue;
        }

        // Tesseract reports -1 when it has no confidence for a word
        let confidence = match fields[10].parse::<f32>() {
            Ok(conf) if conf >= 0.0 => conf / 100.0,
            _ => 0.0,
        };

        fragments.push(TextFragment {
            text: word.to_string(),
            confidence,
            bounding_box: parse_bounding_box(fields[6], fields[7], fields[8], fields[9]),
        });
    }

    fragments
}

fn parse_bounding_box(left: &str, top: &str, width: &str, height: &str) -> Option<BoundingBox> {
    Some(BoundingBox {
        x: left.parse().ok()?,
        y: top.parse().ok()?,
        width: width.parse().ok()?,
        height: height.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::join_fragments;

    const TSV: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t
4\t1\t1\t1\t1\t0\t20\t30\t300\t25\t-1\t
5\t1\t1\t1\t1\t1\t20\t30\t120\t25\t96.5\tHemoglobin
5\t1\t1\t1\t1\t2\t150\t30\t40\t25\t91\t(Hb):
5\t1\t1\t1\t1\t3\t200\t30\t50\t25\t-1\t13.5
5\t1\t1\t1\t1\t4\t260\t30\t50\t25\t88\t 
5\t1\t1\t1\t2\t1\t20\t60\t50\t25\t90\tg/dL";

    #[test]
    fn test_only_word_rows_in_order() {
        let fragments = parse_tsv(TSV);
        assert_eq!(fragments.len(), 4);
        assert_eq!(join_fragments(&fragments), "Hemoglobin (Hb): 13.5 g/dL");
    }

    #[test]
    fn test_confidence_and_box() {
        let fragments = parse_tsv(TSV);
        assert!((fragments[0].confidence - 0.965).abs() < 1e-6);
        assert_eq!(fragments[2].confidence, 0.0);
        assert_eq!(
            fragments[0].bounding_box,
            Some(BoundingBox {
                x: 20,
                y: 30,
                width: 120,
                height: 25
            })
        );
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_tsv("").is_empty());
    }
}
