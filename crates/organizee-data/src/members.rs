use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    MonthlyDuesFilter,
    MonthlyDuesPayment,
    OneTimeFeeFilter,
    OneTimeFeePayment,
    Query,
};

pub const AVATAR_PLACEHOLDER: &str = "https://placehold.co/100x100.png";

/// Membership roles. Stored as kebab-case strings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Ketua,
    WakilKetua,
    Sekretaris,
    Bendahara,
    #[default]
    Member,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "ketua" => Some(Self::Ketua),
            "wakil-ketua" => Some(Self::WakilKetua),
            "sekretaris" => Some(Self::Sekretaris),
            "bendahara" => Some(Self::Bendahara),
            "member" => Some(Self::Member),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Ketua => "ketua",
            Self::WakilKetua => "wakil-ketua",
            Self::Sekretaris => "sekretaris",
            Self::Bendahara => "bendahara",
            Self::Member => "member",
        }
    }
}

/// The acting member's identity as resolved by the session
/// layer. Handlers only ever see id and role.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl From<&Member> for Actor {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            role: member.role,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: String,
    pub birth_date: Option<NaiveDate>,
    pub password_hash: Option<String>,
}

impl Member {

    /// Get the member's one time fee payment, if one was recorded
    pub async fn one_time_fee<DB>(&self, db: &DB) -> Result<Option<OneTimeFeePayment>>
    where
        DB: Query<OneTimeFeePayment, Filter=OneTimeFeeFilter> + Sync,
    {
        let mut payments = db.query(&OneTimeFeeFilter{
            member_id: Some(self.id.clone()),
            ..Default::default()
        }).await?;
        Ok(payments.pop())
    }

    /// Get the member's dues payment for a period, if one was recorded
    pub async fn dues_payment<DB>(
        &self,
        db: &DB,
        month: u32,
        year: i32,
    ) -> Result<Option<MonthlyDuesPayment>>
    where
        DB: Query<MonthlyDuesPayment, Filter=MonthlyDuesFilter> + Sync,
    {
        let mut payments = db.query(&MonthlyDuesFilter{
            member_id: Some(self.id.clone()),
            month: Some(month),
            year: Some(year),
            ..Default::default()
        }).await?;
        Ok(payments.pop())
    }

    // Check if the member's birthday falls in a month
    pub fn has_birthday_in(&self, month: u32) -> bool {
        match self.birth_date {
            Some(date) => date.month() == month,
            None => false,
        }
    }

    /// Next occurrence of the member's birthday on or after `today`.
    /// A Feb 29 birthday falls on Mar 1 in non-leap years.
    pub fn next_birthday(&self, today: NaiveDate) -> Option<NaiveDate> {
        let birth = self.birth_date?;
        let in_year = |year: i32| {
            NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).unwrap())
        };
        let this_year = in_year(today.year());
        if this_year >= today {
            Some(this_year)
        } else {
            Some(in_year(today.year() + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("bendahara"), Some(Role::Bendahara));
        assert_eq!(Role::parse("wakil-ketua"), Some(Role::WakilKetua));
        assert_eq!(Role::parse("chairman"), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn test_role_as_str_round_trip() {
        for role in [
            Role::Admin,
            Role::Ketua,
            Role::WakilKetua,
            Role::Sekretaris,
            Role::Bendahara,
            Role::Member,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_has_birthday_in() {
        let member = Member{
            birth_date: NaiveDate::from_ymd_opt(1992, 8, 22),
            ..Default::default()
        };
        assert!(member.has_birthday_in(8));
        assert!(!member.has_birthday_in(9));
        assert!(!Member::default().has_birthday_in(8));
    }

    #[test]
    fn test_next_birthday() {
        let member = Member{
            birth_date: NaiveDate::from_ymd_opt(1992, 8, 22),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(
            member.next_birthday(today),
            NaiveDate::from_ymd_opt(2024, 8, 22),
        );

        let later = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(
            member.next_birthday(later),
            NaiveDate::from_ymd_opt(2025, 8, 22),
        );
    }

    #[test]
    fn test_next_birthday_leap_day() {
        let member = Member{
            birth_date: NaiveDate::from_ymd_opt(1996, 2, 29),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
        assert_eq!(
            member.next_birthday(today),
            NaiveDate::from_ymd_opt(2023, 3, 1),
        );

        let leap = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(
            member.next_birthday(leap),
            NaiveDate::from_ymd_opt(2024, 2, 29),
        );
    }
}
