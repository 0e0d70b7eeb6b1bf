//! 张力曲线表格解析

use super::sections::{cell_number, header_column, table_rows};
use crate::domain::outline::TensionCurvePoint;

const TENSION_HEADER_KEYWORDS: [&str; 4] = ["张力", "强度", "tension", "情绪值"];

/// 解析张力曲线表格，每行一个点
///
/// 张力列按表头定位，找不到时取该行最后一个含数字的单元格
pub fn parse_tension_curve(markdown: &str) -> Vec<TensionCurvePoint> {
    let rows = table_rows(markdown);
    let Some(header) = rows.first() else {
        return Vec::new();
    };
    let (tension_column, data) = if cell_number(&header[0]).is_some() {
        (None, &rows[..])
    } else {
        (
            header_column(&header[1..], &TENSION_HEADER_KEYWORDS).map(|i| i + 1),
            &rows[1..],
        )
    };

    data.iter()
        .filter_map(|row| {
            let chapter = cell_number(row.first()?)?;
            let tension = match tension_column {
                Some(column) => row.get(column).and_then(|cell| cell_number(cell)),
                None => row.iter().skip(1).rev().find_map(|cell| cell_number(cell)),
            };
            if tension.is_none() {
                tracing::debug!(chapter, "Tension curve row without value, skipped");
            }
            Some(TensionCurvePoint {
                chapter,
                tension: tension?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header() {
        let markdown = "\
| 章节 | 张力值 | 说明 |
|---|---|---|
| 第1章 | 6 | 开篇冲突 |
| 第10章 | 9/10 | 付费卡点 |
| 第11章 | - | 缺失 |
";
        let points = parse_tension_curve(markdown);

        assert_eq!(
            points,
            vec![
                TensionCurvePoint { chapter: 1, tension: 6 },
                TensionCurvePoint { chapter: 10, tension: 9 },
            ]
        );
    }

    #[test]
    fn test_parse_without_tension_header() {
        let points = parse_tension_curve("| 章 | 描述 | 值 |\n| 1 | 起 | 5 |");
        assert_eq!(points, vec![TensionCurvePoint { chapter: 1, tension: 5 }]);
    }

    #[test]
    fn test_empty() {
        assert!(parse_tension_curve("").is_empty());
    }
}
