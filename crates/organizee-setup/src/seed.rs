use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, NaiveDate, Utc};

use organizee_data::{
    Announcement,
    AnnouncementFilter,
    Event,
    EventFilter,
    ExpenseEntry,
    ExpenseFilter,
    IncomeEntry,
    IncomeFilter,
    Insert,
    Member,
    MemberFilter,
    MonthlyDuesFilter,
    MonthlyDuesPayment,
    OneTimeFeeFilter,
    OneTimeFeePayment,
    Query,
    Role,
    Upsert,
    AVATAR_PLACEHOLDER,
};
use organizee_db::Connection;
use organizee_service::password::hash_password;

const DEMO_PASSWORD: &str = "12345";

/// Load the demo data set. Each table is only filled while it is
/// still empty, so re-running leaves existing records alone.
pub async fn install(db: &Connection) -> Result<()> {
    seed_members(db).await?;
    seed_events(db).await?;
    seed_announcements(db).await?;
    seed_fees(db).await?;
    seed_income(db).await?;
    seed_expenses(db).await?;
    seed_dues(db).await?;
    Ok(())
}

fn demo_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(anyhow!("invalid demo date"))
}

async fn seed_members(db: &Connection) -> Result<()> {
    let existing: Vec<Member> = db.query(&MemberFilter::default()).await?;
    if !existing.is_empty() {
        return Ok(());
    }

    // Citra's birthday falls in the current month so the birthday
    // view has something to show.
    let today = Utc::now().date_naive();
    let members = [
        ("1", "Administrator", "admin@example.com", Role::Admin, demo_date(1990, 5, 15)?),
        ("2", "Budi Doremi", "budi@example.com", Role::Bendahara, demo_date(1992, 8, 22)?),
        ("3", "Citra Kirana", "citra@example.com", Role::Member, demo_date(today.year(), today.month(), 5)?),
        ("4", "Dewi Lestari", "dewi@example.com", Role::Member, demo_date(1988, 11, 10)?),
        ("5", "Eka Kurniawan", "eka@example.com", Role::Member, demo_date(1995, 3, 30)?),
    ];

    log::info!("seeding {} demo members", members.len());
    for (id, name, email, role, birth_date) in members {
        db.insert(Member {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            avatar: AVATAR_PLACEHOLDER.to_string(),
            birth_date: Some(birth_date),
            password_hash: Some(hash_password(DEMO_PASSWORD)),
        })
        .await?;
    }
    Ok(())
}

async fn seed_events(db: &Connection) -> Result<()> {
    let existing: Vec<Event> = db.query(&EventFilter::default()).await?;
    if !existing.is_empty() {
        return Ok(());
    }

    let now = Utc::now();
    let events = [
        (
            "1",
            "Monthly General Meeting",
            now + Duration::days(7),
            "Discussion of quarterly progress and planning for the next period. All members are required to attend.",
        ),
        (
            "2",
            "Team Building Workshop",
            now + Duration::days(14),
            "A fun workshop to improve teamwork and collaboration. Don't miss out on the exciting games and activities!",
        ),
        (
            "3",
            "Charity Drive for Local Orphanage",
            now + Duration::days(30),
            "Annual charity drive. We will be collecting donations of clothes, books, and toys.",
        ),
    ];

    log::info!("seeding {} demo events", events.len());
    for (id, title, date, description) in events {
        db.insert(Event {
            id: id.to_string(),
            title: title.to_string(),
            date,
            description: description.to_string(),
            author: "Administrator".to_string(),
        })
        .await?;
    }
    Ok(())
}

async fn seed_announcements(db: &Connection) -> Result<()> {
    let existing: Vec<Announcement> = db.query(&AnnouncementFilter::default()).await?;
    if !existing.is_empty() {
        return Ok(());
    }

    let now = Utc::now();
    let announcements = [
        (
            "1",
            "New Policy on Office Hours",
            now - Duration::days(1),
            "Starting next month, the official office hours will be from 9:00 AM to 5:00 PM, Monday to Friday. Please plan your schedules accordingly.",
        ),
        (
            "2",
            "Holiday Schedule Announcement",
            now - Duration::days(5),
            "The office will be closed on the 25th of this month for a national holiday. We will resume operations on the 26th.",
        ),
    ];

    log::info!("seeding {} demo announcements", announcements.len());
    for (id, title, date, content) in announcements {
        db.insert(Announcement {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            date,
            author: "Administrator".to_string(),
        })
        .await?;
    }
    Ok(())
}

async fn seed_fees(db: &Connection) -> Result<()> {
    let existing: Vec<OneTimeFeePayment> = db.query(&OneTimeFeeFilter::default()).await?;
    if !existing.is_empty() {
        return Ok(());
    }

    let payments = [
        ("1", demo_date(2023, 1, 15)?),
        ("2", demo_date(2023, 10, 15)?),
        ("4", demo_date(2023, 11, 1)?),
    ];

    log::info!("seeding {} demo fee payments", payments.len());
    for (member_id, payment_date) in payments {
        db.upsert(OneTimeFeePayment {
            member_id: member_id.to_string(),
            amount: 50000,
            payment_date,
            ..Default::default()
        })
        .await?;
    }
    Ok(())
}

async fn seed_income(db: &Connection) -> Result<()> {
    let existing: Vec<IncomeEntry> = db.query(&IncomeFilter::default()).await?;
    if !existing.is_empty() {
        return Ok(());
    }

    let entries = [
        ("Donasi dari anggota kehormatan", 250000, demo_date(2023, 12, 1)?),
        ("Sisa dana dari acara tahun lalu", 150000, demo_date(2024, 1, 5)?),
    ];

    log::info!("seeding {} demo income entries", entries.len());
    for (description, amount, date) in entries {
        db.insert(IncomeEntry {
            description: description.to_string(),
            amount,
            date,
            ..Default::default()
        })
        .await?;
    }
    Ok(())
}

async fn seed_expenses(db: &Connection) -> Result<()> {
    let existing: Vec<ExpenseEntry> = db.query(&ExpenseFilter::default()).await?;
    if !existing.is_empty() {
        return Ok(());
    }

    let entries = [
        ("Pembelian ATK untuk rapat bulanan", 75000, demo_date(2024, 2, 10)?),
        ("Biaya konsumsi rapat", 125000, demo_date(2024, 2, 10)?),
        ("Perbaikan proyektor", 200000, demo_date(2024, 3, 20)?),
    ];

    log::info!("seeding {} demo expense entries", entries.len());
    for (description, amount, date) in entries {
        db.insert(ExpenseEntry {
            description: description.to_string(),
            amount,
            date,
            ..Default::default()
        })
        .await?;
    }
    Ok(())
}

async fn seed_dues(db: &Connection) -> Result<()> {
    let existing: Vec<MonthlyDuesPayment> = db.query(&MonthlyDuesFilter::default()).await?;
    if !existing.is_empty() {
        return Ok(());
    }

    let today = Utc::now().date_naive();
    let payments = [
        ("1", demo_date(today.year(), today.month(), 10)?),
        ("2", demo_date(today.year(), today.month(), 12)?),
    ];

    log::info!("seeding {} demo dues payments", payments.len());
    for (member_id, payment_date) in payments {
        db.upsert(MonthlyDuesPayment {
            member_id: member_id.to_string(),
            amount: 20000,
            payment_date,
            month: today.month(),
            year: today.year(),
            ..Default::default()
        })
        .await?;
    }
    Ok(())
}
