//! Input boundary: a raw calculation request is validated once here and the
//! calculators downstream never re-check it.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

use super::entities::{
    ConditionState, FuelType, ImporterStatus, ManufactureDate, Money, Percent, PriceInput,
    RateConfig, ResaleInput, VehicleProfile,
};

/// Largest displacement the simulator accepts.
pub const MAX_DISPLACEMENT_CC: u32 = 5000;
/// Oldest vehicle the simulator accepts.
pub const MAX_AGE_YEARS: u32 = 30;
/// Upper bound for every money figure in a request (prices, profits).
pub const MAX_AMOUNT: Money = dec!(1000000000000000);
/// Accepted range for DZD per EUR exchange rates.
pub const MIN_RATE: Money = dec!(0.0001);
pub const MAX_RATE: Money = dec!(1000000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: Money },
    #[error("{field} must not exceed {max} (got {value})")]
    AmountTooLarge {
        field: &'static str,
        value: Money,
        max: Money,
    },
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveRate { field: &'static str, value: Money },
    #[error("{field} must be between {min} and {max} (got {value})")]
    RateOutOfRange {
        field: &'static str,
        value: Money,
        min: Money,
        max: Money,
    },
    #[error("{field} must be a percentage between 0 and 100 (got {value})")]
    PercentOutOfRange { field: &'static str, value: Percent },
    #[error("displacement must be between 0 and {max} cc (got {value})")]
    DisplacementOutOfRange { value: i64, max: u32 },
    #[error("vehicle age must be between 0 and {max} years (got {value})")]
    AgeOutOfRange { value: i64, max: u32 },
    #[error("manufacture month must be between 1 and 12 (got {0})")]
    InvalidMonth(u8),
    #[error("manufacture date {year}-{month:02} lies in the future")]
    ManufacturedInFuture { year: i32, month: u8 },
    #[error("either the manufacture date or the vehicle age is required")]
    MissingAge,
}

/// Vehicle as entered on the form, before validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    /// Takes precedence over `age_years` when both are present.
    #[serde(default)]
    pub manufactured: Option<ManufactureDate>,
    #[serde(default)]
    pub age_years: Option<i64>,
    pub fuel_type: FuelType,
    pub displacement_cc: i64,
    #[serde(default = "default_condition")]
    pub condition: ConditionState,
}

fn default_condition() -> ConditionState {
    ConditionState::Good
}

/// Partial rate settings; unset fields fall back to a base `RateConfig`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOverrides {
    #[serde(default)]
    pub conversion_rate: Option<Money>,
    #[serde(default)]
    pub vat_rate_percent: Option<Percent>,
    #[serde(default)]
    pub parallel_market_rate: Option<Money>,
}

impl RateOverrides {
    pub fn apply(&self, base: RateConfig) -> RateConfig {
        RateConfig {
            conversion_rate: self.conversion_rate.unwrap_or(base.conversion_rate),
            vat_rate_percent: self.vat_rate_percent.unwrap_or(base.vat_rate_percent),
            parallel_market_rate: self.parallel_market_rate.or(base.parallel_market_rate),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub vehicle: VehicleInput,
    pub importer: ImporterStatus,
    pub price: PriceInput,
    #[serde(default)]
    pub rates: RateOverrides,
    #[serde(default)]
    pub resale: Option<ResaleInput>,
}

/// A request whose every field lies within its declared domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub profile: VehicleProfile,
    pub status: ImporterStatus,
    pub price: PriceInput,
    pub rates: RateConfig,
    pub resale: Option<ResaleInput>,
}

impl CalculationRequest {
    /// Checks every numeric field. `today` anchors the vehicle age and
    /// `default_rates` fills rates the request leaves out.
    pub fn validate(
        &self,
        today: Date,
        default_rates: RateConfig,
    ) -> Result<ValidatedRequest, InputError> {
        let profile = self.vehicle.validate(today)?;

        let price = self.price;
        amount("price.amount", price.amount)?;
        percentage("price.originVatRate", price.origin_vat_rate)?;

        let rates = self.rates.apply(default_rates);
        validate_rates(&rates)?;

        if let Some(resale) = &self.resale {
            amount("resale.resalePrice", resale.resale_price)?;
            amount("resale.desiredProfit", resale.desired_profit)?;
        }

        Ok(ValidatedRequest {
            profile,
            status: self.importer,
            price,
            rates,
            resale: self.resale,
        })
    }
}

impl VehicleInput {
    fn validate(&self, today: Date) -> Result<VehicleProfile, InputError> {
        let age = match (self.manufactured, self.age_years) {
            (Some(date), _) => {
                if !(1..=12).contains(&date.month) {
                    return Err(InputError::InvalidMonth(date.month));
                }
                let age = date.age_at(today);
                if age < 0 {
                    return Err(InputError::ManufacturedInFuture {
                        year: date.year,
                        month: date.month,
                    });
                }
                age
            }
            (None, Some(age)) => age,
            (None, None) => return Err(InputError::MissingAge),
        };

        let age_years = u32::try_from(age)
            .ok()
            .filter(|age| *age <= MAX_AGE_YEARS)
            .ok_or(InputError::AgeOutOfRange {
                value: age,
                max: MAX_AGE_YEARS,
            })?;

        let displacement_cc = u32::try_from(self.displacement_cc)
            .ok()
            .filter(|cc| *cc <= MAX_DISPLACEMENT_CC)
            .ok_or(InputError::DisplacementOutOfRange {
                value: self.displacement_cc,
                max: MAX_DISPLACEMENT_CC,
            })?;

        Ok(VehicleProfile {
            age_years,
            fuel_type: self.fuel_type,
            displacement_cc,
            condition: self.condition,
        })
    }
}

pub fn validate_rates(rates: &RateConfig) -> Result<(), InputError> {
    exchange_rate("rates.conversionRate", rates.conversion_rate)?;
    percentage("rates.vatRatePercent", rates.vat_rate_percent)?;
    if let Some(parallel) = rates.parallel_market_rate {
        exchange_rate("rates.parallelMarketRate", parallel)?;
    }
    Ok(())
}

fn amount(field: &'static str, value: Money) -> Result<(), InputError> {
    if value < Money::ZERO {
        return Err(InputError::NegativeAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(InputError::AmountTooLarge {
            field,
            value,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

fn exchange_rate(field: &'static str, value: Money) -> Result<(), InputError> {
    if value <= Money::ZERO {
        return Err(InputError::NonPositiveRate { field, value });
    }
    if !(MIN_RATE..=MAX_RATE).contains(&value) {
        return Err(InputError::RateOutOfRange {
            field,
            value,
            min: MIN_RATE,
            max: MAX_RATE,
        });
    }
    Ok(())
}

fn percentage(field: &'static str, value: Percent) -> Result<(), InputError> {
    if value < Percent::ZERO || value > dec!(100) {
        return Err(InputError::PercentOutOfRange { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Currency;
    use time::Month;

    fn today() -> Date {
        Date::from_calendar_date(2026, Month::October, 16).unwrap()
    }

    fn request() -> CalculationRequest {
        CalculationRequest {
            vehicle: VehicleInput {
                manufactured: Some(ManufactureDate {
                    year: 2024,
                    month: 3,
                }),
                age_years: None,
                fuel_type: FuelType::Gasoline,
                displacement_cc: 1600,
                condition: ConditionState::Good,
            },
            importer: ImporterStatus::ResidentIndividual,
            price: PriceInput::dzd(dec!(2500000)),
            rates: RateOverrides::default(),
            resale: None,
        }
    }

    #[test]
    fn valid_request_derives_age_and_fills_rates() {
        let validated = request()
            .validate(today(), RateConfig::new(dec!(150)))
            .unwrap();
        assert_eq!(validated.profile.age_years, 2);
        assert_eq!(validated.profile.displacement_cc, 1600);
        assert_eq!(validated.rates, RateConfig::new(dec!(150)));
    }

    #[test]
    fn request_rates_override_defaults() {
        let mut req = request();
        req.rates = RateOverrides {
            conversion_rate: Some(dec!(148.5)),
            vat_rate_percent: None,
            parallel_market_rate: Some(dec!(250)),
        };
        let validated = req.validate(today(), RateConfig::new(dec!(150))).unwrap();
        assert_eq!(validated.rates.conversion_rate, dec!(148.5));
        assert_eq!(validated.rates.vat_rate_percent, dec!(19));
        assert_eq!(validated.rates.parallel_market_rate, Some(dec!(250)));
    }

    #[test]
    fn negative_price_is_rejected_not_clamped() {
        let mut req = request();
        req.price.amount = dec!(-1);
        assert_eq!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::NegativeAmount {
                field: "price.amount",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn amounts_above_the_ceiling_are_rejected() {
        let mut req = request();
        req.price = PriceInput {
            currency: Currency::Eur,
            ..PriceInput::dzd(dec!(1000000000000000000000000000))
        };
        assert_eq!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::AmountTooLarge {
                field: "price.amount",
                value: dec!(1000000000000000000000000000),
                max: MAX_AMOUNT,
            })
        );

        let mut req = request();
        req.resale = Some(ResaleInput {
            resale_price: MAX_AMOUNT + dec!(0.01),
            desired_profit: dec!(0),
            rate_source: Default::default(),
        });
        assert!(matches!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::AmountTooLarge {
                field: "resale.resalePrice",
                ..
            })
        ));

        let mut req = request();
        req.price.amount = MAX_AMOUNT;
        assert!(req.validate(today(), RateConfig::new(dec!(150))).is_ok());
    }

    #[test]
    fn rates_outside_the_accepted_range_are_rejected() {
        let mut req = request();
        req.rates.conversion_rate = Some(dec!(1000001));
        assert!(matches!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::RateOutOfRange {
                field: "rates.conversionRate",
                ..
            })
        ));

        req.rates.conversion_rate = None;
        req.rates.parallel_market_rate = Some(dec!(0.00001));
        assert!(matches!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::RateOutOfRange {
                field: "rates.parallelMarketRate",
                ..
            })
        ));
    }

    #[test]
    fn zero_conversion_rate_is_rejected() {
        let mut req = request();
        req.price.currency = Currency::Eur;
        assert_eq!(
            req.validate(today(), RateConfig::new(dec!(0))),
            Err(InputError::NonPositiveRate {
                field: "rates.conversionRate",
                value: dec!(0),
            })
        );
    }

    #[test]
    fn negative_parallel_rate_is_rejected() {
        let mut req = request();
        req.rates.parallel_market_rate = Some(dec!(-240));
        assert!(matches!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::NonPositiveRate {
                field: "rates.parallelMarketRate",
                ..
            })
        ));
    }

    #[test]
    fn vat_above_hundred_percent_is_rejected() {
        let mut req = request();
        req.rates.vat_rate_percent = Some(dec!(119));
        assert!(matches!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::PercentOutOfRange { .. })
        ));
    }

    #[test]
    fn displacement_outside_domain_is_rejected() {
        let mut req = request();
        req.vehicle.displacement_cc = 5001;
        assert_eq!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::DisplacementOutOfRange {
                value: 5001,
                max: 5000,
            })
        );

        req.vehicle.displacement_cc = -10;
        assert!(req.validate(today(), RateConfig::new(dec!(150))).is_err());
    }

    #[test]
    fn age_rules() {
        let mut req = request();
        req.vehicle.manufactured = None;
        assert_eq!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::MissingAge)
        );

        req.vehicle.age_years = Some(31);
        assert_eq!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::AgeOutOfRange { value: 31, max: 30 })
        );

        req.vehicle.age_years = Some(4);
        let validated = req.validate(today(), RateConfig::new(dec!(150))).unwrap();
        assert_eq!(validated.profile.age_years, 4);
    }

    #[test]
    fn bad_manufacture_dates_are_rejected() {
        let mut req = request();
        req.vehicle.manufactured = Some(ManufactureDate {
            year: 2024,
            month: 13,
        });
        assert_eq!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::InvalidMonth(13))
        );

        req.vehicle.manufactured = Some(ManufactureDate {
            year: 2026,
            month: 12,
        });
        assert_eq!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::ManufacturedInFuture {
                year: 2026,
                month: 12,
            })
        );
    }

    #[test]
    fn absurdly_old_manufacture_year_is_out_of_range() {
        let mut req = request();
        req.vehicle.manufactured = Some(ManufactureDate {
            year: i32::MIN,
            month: 1,
        });
        assert_eq!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::AgeOutOfRange {
                value: 2026 - i64::from(i32::MIN),
                max: MAX_AGE_YEARS,
            })
        );
    }

    #[test]
    fn negative_resale_figures_are_rejected() {
        let mut req = request();
        req.resale = Some(ResaleInput {
            resale_price: dec!(3000000),
            desired_profit: dec!(-5),
            rate_source: Default::default(),
        });
        assert!(matches!(
            req.validate(today(), RateConfig::new(dec!(150))),
            Err(InputError::NegativeAmount {
                field: "resale.desiredProfit",
                ..
            })
        ));
    }
}
