//! コストの正規化
//!
//! 変換元辞書のコストを Mozc の辞書で扱うコストの範囲に写します。

/// 負のコストに割り当てるコスト
pub const NEGATIVE_COST: i32 = 8000;

/// コストの上限
pub const MAX_COST: i32 = 10000;

/// 正規化後のコストの基準値
pub const BASE_COST: i32 = 6000;

/// 元のコストを圧縮する除数
pub const COST_DIVISOR: i32 = 10;

/// 元のコストを Mozc 用のコストに変換します。
///
/// - 負のコストは [`NEGATIVE_COST`] にします。
/// - [`MAX_COST`] を超えるコストは [`MAX_COST`] にします。
/// - それ以外は `6000 + cost / 10` とし、大小関係を保ったまま 6000 台に収めます。
///
/// ```
/// # use lexconv::cost::normalize_cost;
/// assert_eq!(normalize_cost(3942), 6394);
/// ```
#[inline(always)]
pub const fn normalize_cost(cost: i32) -> i32 {
    if cost < 0 {
        NEGATIVE_COST
    } else if cost > MAX_COST {
        MAX_COST
    } else {
        BASE_COST + cost / COST_DIVISOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(normalize_cost(-5), 8000);
        assert_eq!(normalize_cost(i32::MIN), 8000);
        assert_eq!(normalize_cost(15000), 10000);
        assert_eq!(normalize_cost(50000), 10000);
        assert_eq!(normalize_cost(10001), 10000);
    }

    #[test]
    fn test_in_range() {
        assert_eq!(normalize_cost(0), 6000);
        assert_eq!(normalize_cost(9), 6000);
        assert_eq!(normalize_cost(1234), 6123);
        assert_eq!(normalize_cost(10000), 7000);
    }

    #[test]
    fn test_monotonic() {
        let mut prev = normalize_cost(0);
        for c in 1..=MAX_COST {
            let cur = normalize_cost(c);
            assert!(prev <= cur, "normalize_cost({c}) = {cur} < {prev}");
            prev = cur;
        }
    }
}
