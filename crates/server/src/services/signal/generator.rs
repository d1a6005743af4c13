use super::indicators::{self, IndicatorReading};
use crate::dtos::signal_dto::SignalKind;

/// 指标权重，顺序与 `indicators::all_indicators` 一致
const INDICATOR_WEIGHTS: [f64; 4] = [0.25, 0.30, 0.20, 0.15];

/// 一只股票的综合分析结果
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub price: f64,
    pub predicted_price: f64,
    pub signal: SignalKind,
    /// 各指标强度分之和，范围 [-8, 8]
    pub score: i32,
    /// 加权归一化得分，范围 [-2, 2]
    pub weighted_score: f64,
    pub confidence: f64,
    pub rsi: f64,
    pub macd: f64,
    pub reasons: Vec<String>,
}

/// 加权得分映射到信号类型和置信度
pub fn score_to_signal(score: f64) -> (SignalKind, f64) {
    if score >= 1.5 {
        (SignalKind::StrongBuy, (0.7 + score * 0.1).min(0.95))
    } else if score >= 0.5 {
        (SignalKind::Buy, (0.5 + score * 0.15).min(0.85))
    } else if score <= -1.5 {
        (SignalKind::StrongSell, (0.7 + score.abs() * 0.1).min(0.95))
    } else if score <= -0.5 {
        (SignalKind::Sell, (0.5 + score.abs() * 0.15).min(0.85))
    } else {
        (SignalKind::Neutral, 0.5)
    }
}

/// 目标价：买入方向上浮、卖出方向下调，幅度取 max(3%, 2 倍波动率)
pub fn target_price(price: f64, signal: SignalKind, volatility_pct: f64) -> f64 {
    let pct = (volatility_pct * 2.0).max(3.0) / 100.0;
    let target = match signal {
        SignalKind::StrongBuy | SignalKind::Buy => price * (1.0 + pct),
        SignalKind::StrongSell | SignalKind::Sell => price * (1.0 - pct),
        SignalKind::Neutral => price,
    };
    target.round()
}

/// 由收盘价序列生成信号
pub fn analyze(prices: &[f64]) -> Analysis {
    let price = prices.last().copied().unwrap_or(0.0);
    if prices.len() < 2 {
        return Analysis {
            price,
            predicted_price: price,
            signal: SignalKind::Neutral,
            score: 0,
            weighted_score: 0.0,
            confidence: 0.5,
            rsi: 50.0,
            macd: 0.0,
            reasons: vec!["Insufficient data for analysis".to_string()],
        };
    }

    let readings = indicators::all_indicators(prices);

    let mut total = 0.0;
    let mut total_weight = 0.0;
    let mut score = 0;
    let mut reasons = Vec::new();

    for (reading, weight) in readings.iter().zip(INDICATOR_WEIGHTS) {
        let strength = reading.signal.strength();
        total += f64::from(strength) * weight;
        total_weight += weight;
        score += strength;

        if reading.signal != SignalKind::Neutral {
            reasons.push(format!("{}: {}", reading.name, reading.description));
        }
    }

    let weighted_score = if total_weight > 0.0 { total / total_weight } else { 0.0 };
    let (signal, confidence) = score_to_signal(weighted_score);
    let predicted_price = target_price(price, signal, indicators::volatility_pct(prices));

    Analysis {
        price,
        predicted_price,
        signal,
        score,
        weighted_score,
        confidence,
        rsi: reading_value(&readings, 0),
        macd: reading_value(&readings, 1),
        reasons,
    }
}

fn reading_value(readings: &[IndicatorReading], index: usize) -> f64 {
    readings.get(index).map_or(0.0, |r| r.value)
}
