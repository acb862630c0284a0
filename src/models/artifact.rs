use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::indicators::{ComputedIndicators, IndicatorSeries};
use crate::signals::ChangeSummary;
use crate::utils::math::round2;

/// 프런트엔드 차트가 읽는 JSON 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
    /// 지표 이름별 시계열 (`sma50`, `ema9` 등 최상위 키로 펼쳐짐)
    #[serde(flatten)]
    pub indicators: BTreeMap<String, IndicatorSeries>,
    pub meta: ArtifactMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub current_price: f64,
    pub price_change: f64,
    pub percent_change: Option<f64>,
    pub is_positive: bool,
}

impl ArtifactMeta {
    pub fn from_summary(summary: &ChangeSummary) -> Self {
        ArtifactMeta {
            current_price: round2(summary.current_price),
            price_change: round2(summary.absolute_change),
            percent_change: summary.percent_change.map(round2),
            is_positive: summary.is_positive,
        }
    }
}

impl Artifact {
    /// 계산 결과를 모아 문서를 만든다. 반올림은 여기서 한 번만 적용.
    pub fn assemble(
        dates: Vec<String>,
        closes: &[f64],
        indicators: &ComputedIndicators,
        summary: &ChangeSummary,
    ) -> Self {
        let indicators: BTreeMap<String, IndicatorSeries> = indicators
            .iter()
            .map(|(spec, series)| {
                let rounded: IndicatorSeries = series.iter().map(|v| v.map(round2)).collect();
                (spec.name.clone(), rounded)
            })
            .collect();

        Artifact {
            dates,
            prices: closes.iter().copied().map(round2).collect(),
            indicators,
            meta: ArtifactMeta::from_summary(summary),
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
