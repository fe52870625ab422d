//! Initial users and polls.
//!
//! Seeded polls carry tallies from before the ledger existed, so their
//! totals are not backed by user votes.

use chrono::NaiveDate;
use forum_warga_common::{AppError, AppResult};

use crate::entities::{PollCategory, PollStatus, UserRole, VoteOption, poll, user};

struct SeedUser {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    house_number: &'static str,
    rt: &'static str,
    rw: &'static str,
    role: UserRole,
}

const USERS: [SeedUser; 4] = [
    SeedUser {
        id: "1",
        name: "Ahmad Wijaya",
        email: "ahmad.wijaya@email.com",
        house_number: "A-15",
        rt: "05",
        rw: "02",
        role: UserRole::Resident,
    },
    SeedUser {
        id: "2",
        name: "Siti Nurhaliza",
        email: "siti.nurhaliza@email.com",
        house_number: "B-23",
        rt: "06",
        rw: "02",
        role: UserRole::RtHead,
    },
    SeedUser {
        id: "3",
        name: "Budi Santoso",
        email: "budi.santoso@email.com",
        house_number: "C-08",
        rt: "07",
        rw: "02",
        role: UserRole::Resident,
    },
    SeedUser {
        id: "4",
        name: "Dewi Lestari",
        email: "dewi.lestari@email.com",
        house_number: "A-32",
        rt: "05",
        rw: "02",
        role: UserRole::Admin,
    },
];

struct SeedPoll {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: PollCategory,
    options: &'static [(&'static str, &'static str, u32)],
    start_date: &'static str,
    end_date: &'static str,
    status: PollStatus,
    created_by: &'static str,
    allow_multiple: bool,
}

const POLLS: [SeedPoll; 4] = [
    SeedPoll {
        id: "1",
        title: "Renovasi Taman Bermain Anak",
        description: "Usulan untuk merenovasi taman bermain anak di area cluster dengan menambah fasilitas baru dan memperbaiki yang sudah ada.",
        category: PollCategory::Facility,
        options: &[
            ("1a", "Setuju dengan renovasi penuh", 45),
            ("1b", "Renovasi sebagian saja", 23),
            ("1c", "Tidak perlu renovasi", 8),
        ],
        start_date: "2025-01-01",
        end_date: "2025-01-15",
        status: PollStatus::Active,
        created_by: "Pengurus RT 05",
        allow_multiple: false,
    },
    SeedPoll {
        id: "2",
        title: "Sistem Keamanan 24 Jam",
        description: "Proposal implementasi sistem keamanan 24 jam dengan penambahan CCTV dan pos jaga malam.",
        category: PollCategory::Security,
        options: &[
            ("2a", "Sangat mendukung", 52),
            ("2b", "Mendukung dengan syarat", 18),
            ("2c", "Kurang mendukung", 5),
            ("2d", "Tidak mendukung", 2),
        ],
        start_date: "2024-12-20",
        end_date: "2025-01-10",
        status: PollStatus::Active,
        created_by: "Ketua RW 02",
        allow_multiple: false,
    },
    SeedPoll {
        id: "3",
        title: "Perayaan Tahun Baru Cluster",
        description: "Pilihan konsep perayaan tahun baru bersama warga cluster. Acara akan diadakan di lapangan utama.",
        category: PollCategory::Event,
        options: &[
            ("3a", "Konser musik live", 34),
            ("3b", "Bazaar kuliner", 28),
            ("3c", "Games dan doorprize", 31),
            ("3d", "Pertunjukan seni tradisional", 15),
        ],
        start_date: "2024-12-15",
        end_date: "2024-12-30",
        status: PollStatus::Ended,
        created_by: "Panitia Acara",
        allow_multiple: true,
    },
    SeedPoll {
        id: "4",
        title: "Jadwal Pengangkutan Sampah",
        description: "Penyesuaian jadwal pengangkutan sampah untuk efisiensi dan kebersihan lingkungan cluster.",
        category: PollCategory::Maintenance,
        options: &[
            ("4a", "Senin, Rabu, Jumat", 0),
            ("4b", "Selasa, Kamis, Sabtu", 0),
            ("4c", "Setiap hari kecuali Minggu", 0),
        ],
        start_date: "2025-01-20",
        end_date: "2025-02-05",
        status: PollStatus::Upcoming,
        created_by: "Pengurus Kebersihan",
        allow_multiple: false,
    },
];

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    value
        .parse()
        .map_err(|e| AppError::Internal(format!("Invalid seed date {value}: {e}")))
}

/// The initial residents.
#[must_use]
pub fn users() -> Vec<user::Model> {
    USERS
        .iter()
        .map(|u| user::Model {
            id: u.id.to_string(),
            name: u.name.to_string(),
            email: u.email.to_string(),
            house_number: u.house_number.to_string(),
            rt: u.rt.to_string(),
            rw: u.rw.to_string(),
            role: u.role,
        })
        .collect()
}

/// The initial polls, in display order.
pub fn polls() -> AppResult<Vec<poll::Model>> {
    POLLS
        .iter()
        .map(|p| {
            let options: Vec<VoteOption> = p
                .options
                .iter()
                .map(|&(id, text, votes)| VoteOption {
                    id: id.to_string(),
                    text: text.to_string(),
                    votes,
                })
                .collect();
            // Seeded tallies have one option per event.
            let total_votes = options.iter().map(|o| o.votes).sum();

            Ok(poll::Model {
                id: p.id.to_string(),
                title: p.title.to_string(),
                description: p.description.to_string(),
                category: p.category,
                options,
                start_date: parse_date(p.start_date)?,
                end_date: parse_date(p.end_date)?,
                total_votes,
                status: p.status,
                created_by: p.created_by.to_string(),
                allow_multiple: p.allow_multiple,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_users() {
        let users = users();
        assert_eq!(users.len(), 4);
        assert_eq!(users[0].name, "Ahmad Wijaya");
        assert_eq!(users[1].role, UserRole::RtHead);
        assert_eq!(users[3].role, UserRole::Admin);
    }

    #[test]
    fn test_seed_polls_totals() {
        let polls = polls().unwrap();
        let totals: Vec<_> = polls.iter().map(|p| (p.id.as_str(), p.total_votes)).collect();
        assert_eq!(totals, vec![("1", 76), ("2", 77), ("3", 108), ("4", 0)]);
        for poll in &polls {
            assert_eq!(u64::from(poll.total_votes), poll.option_vote_sum());
        }
        assert!(polls[2].allow_multiple);
        assert_eq!(polls[3].status, PollStatus::Upcoming);
        assert_eq!(polls[1].start_date.to_string(), "2024-12-20");
    }
}
