// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::errors::ProcessorError;
use crate::models::transaction::Event;
use crate::utils::event::first_attribute_value;

/// Significant digits carried through decimal divisions.
pub const DECIMAL_PRECISION: u64 = 50;

/// Default scaling divisor: most Kava denoms are micro-units.
pub const DEFAULT_DIVISOR: u64 = 1_000_000;

/// Denoms scaled by 10^8 instead of the default 10^6.
const CENTI_MICRO_DENOMS: &[&str] = &["busd", "bnb", "xrp"];

/// One reward transfer, already lexed and scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct Reward {
    pub token: String,
    pub amount: BigDecimal,
}

/// Splits a compound `quantity+denom` token (`1000000ukava`) into its raw
/// magnitude (maximal leading digit run) and denom remainder.
///
/// Denom aliasing: `ukava` and the empty string become `kava`, `xrpb`
/// becomes `xrp`; everything else passes through unchanged.
pub fn split_amount(compound: &str) -> Result<(String, String), ProcessorError> {
    let digits = compound.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return Err(ProcessorError::InvalidAmount {
            raw: compound.to_string(),
        });
    }
    let (magnitude, denom) = compound.split_at(digits);
    let denom = match denom {
        "ukava" | "" => "kava",
        "xrpb" => "xrp",
        other => other,
    };
    Ok((magnitude.to_string(), denom.to_string()))
}

/// Scales a raw integer magnitude to its exact decimal amount.
///
/// The divisor is 10^6 unless the denom is one of the 10^8-scaled assets.
/// Division is exact arbitrary-precision decimal arithmetic bounded at
/// [`DECIMAL_PRECISION`] significant digits; binary floats never appear.
pub fn scale_to_decimal(raw: &str, denom: Option<&str>) -> Result<BigDecimal, ProcessorError> {
    let magnitude = BigDecimal::from_str(raw).map_err(|_| ProcessorError::InvalidAmount {
        raw: raw.to_string(),
    })?;
    let divisor = match denom {
        Some(d) if CENTI_MICRO_DENOMS.contains(&d) => BigDecimal::from(100_000_000u64),
        _ => BigDecimal::from(DEFAULT_DIVISOR),
    };
    Ok((magnitude / divisor).with_prec(DECIMAL_PRECISION).normalized())
}

/// Lexes and scales every reward inside a transfer event's comma-joined
/// `amount` attribute (`39ukava,12hard`). A missing event or missing
/// attribute yields an empty list, not an error.
pub fn collect_rewards(event: Option<&Event>) -> Result<Vec<Reward>, ProcessorError> {
    let Some(event) = event else {
        return Ok(Vec::new());
    };
    let Ok(joined) = first_attribute_value(&event.attributes, "amount") else {
        return Ok(Vec::new());
    };

    let mut rewards = Vec::new();
    for compound in joined.split(',').filter(|s| !s.is_empty()) {
        let (magnitude, token) = split_amount(compound)?;
        let amount = scale_to_decimal(&magnitude, Some(&token))?;
        rewards.push(Reward { token, amount });
    }
    Ok(rewards)
}

/// Canonical string rendering of a scaled amount: exact decimal with
/// trailing zeros stripped. Used for both entry amounts and comments so the
/// two always agree.
pub fn decimal_string(amount: &BigDecimal) -> String {
    amount.normalized().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::Attribute;

    #[test]
    fn split_amount_lexes_magnitude_and_denom() {
        assert_eq!(
            split_amount("1000000ukava").unwrap(),
            ("1000000".to_string(), "kava".to_string())
        );
        assert_eq!(
            split_amount("500usdx").unwrap(),
            ("500".to_string(), "usdx".to_string())
        );
    }

    #[test]
    fn split_amount_applies_denom_aliases() {
        assert_eq!(split_amount("10").unwrap().1, "kava");
        assert_eq!(split_amount("10xrpb").unwrap().1, "xrp");
        // only ukava, the empty string and xrpb are aliased
        assert_eq!(split_amount("10bnb").unwrap().1, "bnb");
    }

    #[test]
    fn split_amount_rejects_missing_digits() {
        let err = split_amount("ukava").unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidAmount { .. }));
    }

    #[test]
    fn scale_to_decimal_uses_default_divisor() {
        assert_eq!(
            scale_to_decimal("1000000", Some("kava")).unwrap(),
            BigDecimal::from(1)
        );
        assert_eq!(
            decimal_string(&scale_to_decimal("1180", None).unwrap()),
            "0.00118"
        );
    }

    #[test]
    fn scale_to_decimal_uses_larger_divisor_for_bep2_assets() {
        for denom in ["busd", "bnb", "xrp"] {
            assert_eq!(
                scale_to_decimal("100000000", Some(denom)).unwrap(),
                BigDecimal::from(1)
            );
        }
        // unknown denoms fall back to the default divisor
        assert_eq!(
            scale_to_decimal("1000000", Some("hard")).unwrap(),
            BigDecimal::from(1)
        );
    }

    #[test]
    fn scale_to_decimal_is_exact_not_float() {
        let scaled = scale_to_decimal("1", Some("kava")).unwrap();
        assert_eq!(decimal_string(&scaled), "0.000001");
    }

    #[test]
    fn collect_rewards_splits_comma_joined_amounts() {
        let event = Event {
            event_type: "transfer".to_string(),
            attributes: vec![Attribute {
                key: "amount".to_string(),
                value: "39ukava,224049hard".to_string(),
            }],
        };
        let rewards = collect_rewards(Some(&event)).unwrap();
        assert_eq!(rewards.len(), 2);
        assert_eq!(rewards[0].token, "kava");
        assert_eq!(decimal_string(&rewards[0].amount), "0.000039");
        assert_eq!(rewards[1].token, "hard");
        assert_eq!(decimal_string(&rewards[1].amount), "0.224049");
    }

    #[test]
    fn collect_rewards_is_empty_without_event() {
        assert!(collect_rewards(None).unwrap().is_empty());
        let event = Event {
            event_type: "transfer".to_string(),
            attributes: vec![],
        };
        assert!(collect_rewards(Some(&event)).unwrap().is_empty());
    }
}
