use serde::{Deserialize, Serialize};

/// Presentation layer views, keyed by the records they render.
/// A mutation reports the set it makes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Dashboard,
    Members,
    Birthdays,
    Events,
    Announcements,
    Profile,
    OneTimeFee,
    MonthlyDues,
    Income,
    Expenses,
    Wallet,
}

impl View {

    /// Route of the view in the web client's page tree
    pub fn path(&self) -> &'static str {
        match self {
            View::Dashboard => "/dashboard",
            View::Members => "/dashboard/members",
            View::Birthdays => "/dashboard/birthdays",
            View::Events => "/dashboard/events",
            View::Announcements => "/dashboard/announcements",
            View::Profile => "/dashboard/profile",
            View::OneTimeFee => "/dashboard/keuangan/uang-pangkal",
            View::MonthlyDues => "/dashboard/keuangan/iuran-bulanan",
            View::Income => "/dashboard/keuangan/pemasukan",
            View::Expenses => "/dashboard/keuangan/pengeluaran",
            View::Wallet => "/dashboard/keuangan/dompet-saldo",
        }
    }
}

/// A successfully applied mutation: the stored record plus the
/// views the caller should refresh.
#[derive(Debug, Clone)]
pub struct Applied<T> {
    pub record: T,
    pub refresh: &'static [View],
}

impl<T> Applied<T> {
    pub fn new(record: T, refresh: &'static [View]) -> Self {
        Self { record, refresh }
    }
}
