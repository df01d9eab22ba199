use chrono::NaiveDate;

use organizee_data::Member;

/// Members celebrating in the given month, roster order.
pub fn birthdays_in_month(members: &[Member], month: u32) -> Vec<&Member> {
    members
        .iter()
        .filter(|member| member.has_birthday_in(month))
        .collect()
}

/// Members whose next birthday falls within the coming days,
/// soonest first. Members without a birth date are skipped.
pub fn upcoming_birthdays(
    members: &[Member],
    today: NaiveDate,
    within_days: i64,
) -> Vec<(NaiveDate, &Member)> {
    let horizon = today + chrono::Duration::days(within_days);
    let mut upcoming: Vec<(NaiveDate, &Member)> = members
        .iter()
        .filter_map(|member| {
            let date = member.next_birthday(today)?;
            if date <= horizon {
                Some((date, member))
            } else {
                None
            }
        })
        .collect();
    upcoming.sort_by_key(|(date, _)| *date);
    upcoming
}
