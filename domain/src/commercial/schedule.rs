//! Payment schedule preview

use super::terms::PlanFrequency;
use crate::core::error::DomainError;
use crate::core::money::Money;
use crate::core::percentage::Percentage;
use serde::Serialize;

/// One installment of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Installment {
    /// 1-based position
    pub number: u32,
    /// Months after the down payment
    pub due_after_months: u32,
    pub amount: Money,
}

/// Down payment plus equal installments over the financed remainder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSchedule {
    pub price: Money,
    pub down_payment: Money,
    pub installments: Vec<Installment>,
}

impl PaymentSchedule {
    /// Build a schedule. Installments are equal to the cent; the last one
    /// absorbs the rounding remainder so the parts always add up to `price`.
    pub fn build(
        price: Money,
        down_payment_percentage: Percentage,
        installment_count: u32,
        frequency: PlanFrequency,
    ) -> Result<Self, DomainError> {
        let down_payment = down_payment_percentage.of(price);
        let financed = price - down_payment;

        if installment_count == 0 {
            if financed.is_zero() {
                return Ok(Self {
                    price,
                    down_payment,
                    installments: Vec::new(),
                });
            }
            return Err(DomainError::InvalidSchedule(format!(
                "{} left to finance but no installments",
                financed
            )));
        }

        let count = i64::from(installment_count);
        let base = financed.cents() / count;
        let remainder = financed.cents() - base * count;

        let installments = (1..=installment_count)
            .map(|number| {
                let extra = if number == installment_count { remainder } else { 0 };
                Installment {
                    number,
                    due_after_months: number * frequency.months(),
                    amount: Money::from_cents(base + extra),
                }
            })
            .collect();

        Ok(Self {
            price,
            down_payment,
            installments,
        })
    }

    pub fn financed(&self) -> Money {
        self.installments.iter().map(|i| i.amount).sum()
    }

    pub fn total(&self) -> Money {
        self.down_payment + self.financed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_sums_to_price() {
        let price = Money::parse("1,000,000.01").unwrap();
        let schedule = PaymentSchedule::build(
            price,
            Percentage::from_whole(20).unwrap(),
            3,
            PlanFrequency::Monthly,
        )
        .unwrap();

        assert_eq!(schedule.down_payment, Money::from_units(200_000));
        assert_eq!(schedule.installments.len(), 3);
        assert_eq!(schedule.total(), price);
        assert_eq!(schedule.installments[0].amount, schedule.installments[1].amount);
        assert!(schedule.installments[2].amount >= schedule.installments[0].amount);
    }

    #[test]
    fn test_quarterly_due_dates() {
        let schedule = PaymentSchedule::build(
            Money::from_units(1200),
            Percentage::ZERO,
            4,
            PlanFrequency::Quarterly,
        )
        .unwrap();
        let due: Vec<_> = schedule.installments.iter().map(|i| i.due_after_months).collect();
        assert_eq!(due, vec![3, 6, 9, 12]);
        assert_eq!(schedule.installments[0].amount, Money::from_units(300));
    }

    #[test]
    fn test_zero_installments_needs_full_down_payment() {
        assert!(PaymentSchedule::build(
            Money::from_units(100),
            Percentage::from_whole(50).unwrap(),
            0,
            PlanFrequency::Monthly
        )
        .is_err());

        let paid_up = PaymentSchedule::build(
            Money::from_units(100),
            Percentage::FULL,
            0,
            PlanFrequency::Monthly,
        )
        .unwrap();
        assert!(paid_up.installments.is_empty());
        assert_eq!(paid_up.total(), Money::from_units(100));
    }
}
