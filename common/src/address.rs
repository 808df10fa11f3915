//! 住所行の抽出
//!
//! OCRテキストを改行で分割し、行政区画の文字（都道府県市区町村）を
//! 含む行だけを残す。エクスポートとマップリンクの両方がこの関数を使う。

use regex::Regex;

/// 住所とみなす行政区画の文字
pub const ADDRESS_MARKERS: [char; 8] = ['都', '道', '府', '県', '市', '区', '町', '村'];

lazy_static::lazy_static! {
    static ref ADDRESS_RE: Regex = Regex::new(r"[都道府県市区町村]").unwrap();
}

/// 1行が住所らしいか判定
pub fn is_address_line(line: &str) -> bool {
    ADDRESS_RE.is_match(line)
}

/// テキストから住所行を抽出
///
/// 行は加工しない（前後の空白や`\r`もそのまま残る）。元の順序を保つ。
///
/// # Examples
/// ```
/// use ocr_address_common::extract_address_lines;
///
/// let lines = extract_address_lines("東京都千代田区1-1\nHello\n大阪府大阪市北区2-2");
/// assert_eq!(lines, vec!["東京都千代田区1-1", "大阪府大阪市北区2-2"]);
/// ```
pub fn extract_address_lines(text: &str) -> Vec<&str> {
    text.split('\n').filter(|line| is_address_line(line)).collect()
}

/// 抽出済みの行を再フィルタ
pub fn filter_address_lines<'a, I>(lines: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter(|line| is_address_line(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_match_regex() {
        for marker in ADDRESS_MARKERS {
            assert!(is_address_line(&marker.to_string()), "{} が一致しない", marker);
        }
    }

    #[test]
    fn test_drops_non_address_lines() {
        let text = "東京都千代田区1-1\nHello\n大阪府大阪市北区2-2";
        let lines = extract_address_lines(text);
        assert_eq!(lines, vec!["東京都千代田区1-1", "大阪府大阪市北区2-2"]);
    }

    #[test]
    fn test_each_marker_alone_is_enough() {
        let text = "北海道\n京都府\n横浜市\n港区\n寒川町\n檜原村\n千葉県";
        assert_eq!(extract_address_lines(text).len(), 7);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_address_lines("").is_empty());
    }

    #[test]
    fn test_text_without_addresses() {
        let text = "領収書\nTOTAL 1,200\nありがとうございました";
        assert!(extract_address_lines(text).is_empty());
    }

    #[test]
    fn test_lines_are_not_modified() {
        let text = "  東京都港区芝公園4-2-8 \r\nfoo";
        let lines = extract_address_lines(text);
        assert_eq!(lines, vec!["  東京都港区芝公園4-2-8 \r"]);
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let text = "札幌市\nx\n札幌市\n函館市";
        assert_eq!(extract_address_lines(text), vec!["札幌市", "札幌市", "函館市"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let text = "〒100-0001\n東京都千代田区千代田1-1\nTEL 03-0000-0000\n福岡県福岡市中央区天神";
        let once = extract_address_lines(text);
        let twice = filter_address_lines(once.iter().copied());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_is_consistent_between_calls() {
        let text = "名古屋市中区\nABC\n神戸市中央区";
        assert_eq!(extract_address_lines(text), extract_address_lines(text));
    }
}
