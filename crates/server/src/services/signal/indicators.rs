use crate::dtos::signal_dto::SignalKind;

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BB_PERIOD: usize = 20;
pub const BB_STD: f64 = 2.0;

impl SignalKind {
    /// 指标强度分，STRONG_BUY = 2 ... STRONG_SELL = -2
    pub fn strength(&self) -> i32 {
        match self {
            SignalKind::StrongBuy => 2,
            SignalKind::Buy => 1,
            SignalKind::Neutral => 0,
            SignalKind::Sell => -1,
            SignalKind::StrongSell => -2,
        }
    }
}

/// 单个指标的计算结果
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorReading {
    pub name: &'static str,
    pub value: f64,
    pub signal: SignalKind,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// 当前价在上下轨之间的相对位置，0 为下轨，1 为上轨
    pub position: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 总体标准差
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// 逐点 EMA，首值取序列首值
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    for &v in values {
        let next = match out.last() {
            Some(prev) => alpha * v + (1.0 - alpha) * prev,
            None => v,
        };
        out.push(next);
    }
    out
}

/// 简单移动平均，数据不足一个周期时取全部均值
pub fn sma(prices: &[f64], period: usize) -> f64 {
    if prices.len() < period {
        return mean(prices);
    }
    mean(&prices[prices.len() - period..])
}

/// RSI，最近 period 个涨跌幅的简单均值
pub fn rsi(prices: &[f64], period: usize) -> (f64, SignalKind) {
    if prices.len() < period + 1 {
        return (50.0, SignalKind::Neutral);
    }

    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let recent = &deltas[deltas.len() - period..];
    let avg_gain = recent.iter().map(|d| d.max(0.0)).sum::<f64>() / period as f64;
    let avg_loss = recent.iter().map(|d| (-d).max(0.0)).sum::<f64>() / period as f64;

    let value = if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    };

    let signal = match value {
        v if v <= 20.0 => SignalKind::StrongBuy,
        v if v <= 30.0 => SignalKind::Buy,
        v if v >= 80.0 => SignalKind::StrongSell,
        v if v >= 70.0 => SignalKind::Sell,
        _ => SignalKind::Neutral,
    };

    (round_to(value, 2), signal)
}

/// MACD(12,26,9)，柱状图由负转正为买入，由正转负为卖出
pub fn macd(prices: &[f64]) -> (Macd, SignalKind) {
    let flat = Macd { macd: 0.0, signal: 0.0, histogram: 0.0 };
    if prices.len() < MACD_SLOW + MACD_SIGNAL {
        return (flat, SignalKind::Neutral);
    }

    let fast = ema_series(prices, MACD_FAST);
    let slow = ema_series(prices, MACD_SLOW);
    let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_line = ema_series(&line, MACD_SIGNAL);
    let histogram: Vec<f64> = line.iter().zip(&signal_line).map(|(m, s)| m - s).collect();

    let n = histogram.len();
    let current = histogram[n - 1];
    let prev = histogram[n - 2];

    let signal = if current > 0.0 && prev <= 0.0 {
        SignalKind::Buy
    } else if current < 0.0 && prev >= 0.0 {
        SignalKind::Sell
    } else if current > 0.0 && current > prev {
        SignalKind::Buy
    } else if current < 0.0 && current < prev {
        SignalKind::Sell
    } else {
        SignalKind::Neutral
    };

    (
        Macd {
            macd: round_to(line[n - 1], 4),
            signal: round_to(signal_line[n - 1], 4),
            histogram: round_to(current, 4),
        },
        signal,
    )
}

/// 布林带(20,2)，贴近下轨偏买，贴近上轨偏卖
pub fn bollinger_bands(prices: &[f64]) -> Option<(BollingerBands, SignalKind)> {
    if prices.len() < BB_PERIOD {
        return None;
    }

    let window = &prices[prices.len() - BB_PERIOD..];
    let middle = mean(window);
    let std = std_dev(window);
    let upper = middle + BB_STD * std;
    let lower = middle - BB_STD * std;
    let current = prices[prices.len() - 1];

    // 带宽为零时视为居中
    let position = if upper > lower { (current - lower) / (upper - lower) } else { 0.5 };

    let signal = match position {
        p if p <= 0.1 => SignalKind::StrongBuy,
        p if p <= 0.2 => SignalKind::Buy,
        p if p >= 0.9 => SignalKind::StrongSell,
        p if p >= 0.8 => SignalKind::Sell,
        _ => SignalKind::Neutral,
    };

    Some((
        BollingerBands {
            upper: round_to(upper, 2),
            middle: round_to(middle, 2),
            lower: round_to(lower, 2),
            position: round_to(position, 2),
        },
        signal,
    ))
}

/// 均线排列：价格 > SMA20 > SMA50 为多头，反之为空头
pub fn moving_average_trend(prices: &[f64]) -> (f64, f64, SignalKind) {
    let sma20 = sma(prices, 20);
    let sma50 = sma(prices, 50);
    let current = prices.last().copied().unwrap_or(0.0);

    let signal = if current > sma20 && sma20 > sma50 {
        SignalKind::Buy
    } else if current < sma20 && sma20 < sma50 {
        SignalKind::Sell
    } else {
        SignalKind::Neutral
    };

    (sma20, sma50, signal)
}

/// 最近 20 日收益率的标准差（百分比），数据不足时默认 2%
pub fn volatility_pct(prices: &[f64]) -> f64 {
    if prices.len() < BB_PERIOD {
        return 2.0;
    }
    let window = &prices[prices.len() - BB_PERIOD..];
    let returns: Vec<f64> = window
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();
    std_dev(&returns) * 100.0
}

/// 计算全部指标，顺序固定为 RSI、MACD、布林带、均线
pub fn all_indicators(prices: &[f64]) -> Vec<IndicatorReading> {
    let mut readings = Vec::with_capacity(4);

    let (rsi_value, rsi_signal) = rsi(prices, RSI_PERIOD);
    let zone = if rsi_value < 30.0 {
        "Oversold"
    } else if rsi_value > 70.0 {
        "Overbought"
    } else {
        "Neutral"
    };
    readings.push(IndicatorReading {
        name: "RSI (14)",
        value: rsi_value,
        signal: rsi_signal,
        description: format!("RSI at {rsi_value}: {zone}"),
    });

    let (macd_values, macd_signal) = macd(prices);
    readings.push(IndicatorReading {
        name: "MACD (12,26,9)",
        value: macd_values.histogram,
        signal: macd_signal,
        description: format!("MACD Histogram: {}", macd_values.histogram),
    });

    let (position, bb_signal) = bollinger_bands(prices)
        .map(|(bands, signal)| (bands.position, signal))
        .unwrap_or((0.5, SignalKind::Neutral));
    readings.push(IndicatorReading {
        name: "Bollinger Bands (20,2)",
        value: position,
        signal: bb_signal,
        description: format!("Price at {:.0}% of bands", position * 100.0),
    });

    let (sma20, sma50, ma_signal) = moving_average_trend(prices);
    let current = prices.last().copied().unwrap_or(0.0);
    readings.push(IndicatorReading {
        name: "MA Cross (20/50)",
        value: current,
        signal: ma_signal,
        description: format!("Price: {current:.0}, SMA20: {sma20:.0}, SMA50: {sma50:.0}"),
    });

    readings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(start: f64, step: f64, len: usize) -> Vec<f64> {
        (0..len).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn test_rsi_needs_enough_data() {
        let prices = linear(100.0, 1.0, RSI_PERIOD);
        assert_eq!(rsi(&prices, RSI_PERIOD), (50.0, SignalKind::Neutral));
    }

    #[test]
    fn test_rsi_extremes() {
        let rising = linear(100.0, 1.0, 30);
        assert_eq!(rsi(&rising, RSI_PERIOD), (100.0, SignalKind::StrongSell));

        let falling = linear(100.0, -1.0, 30);
        assert_eq!(rsi(&falling, RSI_PERIOD), (0.0, SignalKind::StrongBuy));
    }

    #[test]
    fn test_rsi_balanced_moves() {
        // 涨跌交替且幅度相同
        let prices: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 100.0 } else { 102.0 }).collect();
        let (value, signal) = rsi(&prices, RSI_PERIOD);
        assert_eq!(value, 50.0);
        assert_eq!(signal, SignalKind::Neutral);
    }

    #[test]
    fn test_macd_flat_series() {
        let short = linear(100.0, 1.0, MACD_SLOW + MACD_SIGNAL - 1);
        assert_eq!(macd(&short).1, SignalKind::Neutral);
        assert_eq!(macd(&short).0.histogram, 0.0);

        let flat = vec![50.0; 60];
        let (values, signal) = macd(&flat);
        assert_eq!(values, Macd { macd: 0.0, signal: 0.0, histogram: 0.0 });
        assert_eq!(signal, SignalKind::Neutral);
    }

    #[test]
    fn test_macd_line_follows_trend() {
        let (up, _) = macd(&linear(100.0, 1.0, 60));
        assert!(up.macd > 0.0);
        assert!(up.histogram > 0.0);

        let (down, _) = macd(&linear(200.0, -1.0, 60));
        assert!(down.macd < 0.0);
        assert!(down.histogram < 0.0);
    }

    #[test]
    fn test_bollinger_bands() {
        assert!(bollinger_bands(&linear(100.0, 1.0, BB_PERIOD - 1)).is_none());

        let (flat, signal) = bollinger_bands(&vec![80.0; 25]).unwrap();
        assert_eq!(flat.upper, flat.lower);
        assert_eq!(flat.position, 0.5);
        assert_eq!(signal, SignalKind::Neutral);

        // 线性下跌时最新价贴近下轨
        let (bands, signal) = bollinger_bands(&linear(3000.0, -10.0, 40)).unwrap();
        assert!(bands.position < 0.1);
        assert!(bands.lower < bands.middle && bands.middle < bands.upper);
        assert_eq!(signal, SignalKind::StrongBuy);

        let (_, signal) = bollinger_bands(&linear(1000.0, 10.0, 40)).unwrap();
        assert_eq!(signal, SignalKind::StrongSell);
    }

    #[test]
    fn test_moving_average_trend() {
        assert_eq!(moving_average_trend(&linear(100.0, 1.0, 60)).2, SignalKind::Buy);
        assert_eq!(moving_average_trend(&linear(200.0, -1.0, 60)).2, SignalKind::Sell);
        assert_eq!(moving_average_trend(&vec![10.0; 60]).2, SignalKind::Neutral);
        assert_eq!(sma(&[1.0, 2.0, 3.0], 20), 2.0);
    }

    #[test]
    fn test_volatility_defaults_and_flat() {
        assert_eq!(volatility_pct(&[100.0, 101.0]), 2.0);
        assert_eq!(volatility_pct(&vec![100.0; 30]), 0.0);
    }

    #[test]
    fn test_all_indicators_order() {
        let readings = all_indicators(&linear(100.0, -1.0, 60));
        let names: Vec<_> = readings.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["RSI (14)", "MACD (12,26,9)", "Bollinger Bands (20,2)", "MA Cross (20/50)"]);
        assert_eq!(readings[0].description, "RSI at 0: Oversold");
    }
}
