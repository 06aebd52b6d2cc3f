//! Library catalogue, teacher directory, calendar and feedback fixtures.

use chrono::NaiveDate;
use tracing::debug;

use eduzone_db::Repositories;
use eduzone_models::{EventFilterParams, NewBook, NewEvent, NewFeedback, NewTeacher};

use super::SeedError;

const BOOKS: &[(&str, &str, &str, &str, i32)] = &[
    ("To Kill a Mockingbird", "Harper Lee", "9780061120084", "Fiction", 10),
    ("1984", "George Orwell", "9780451524935", "Science Fiction", 15),
    ("The Great Gatsby", "F. Scott Fitzgerald", "9780743273565", "Classic", 8),
    ("Pride and Prejudice", "Jane Austen", "9780141439518", "Classic", 10),
    ("The Hobbit", "J.R.R. Tolkien", "9780547928227", "Fantasy", 12),
];

pub(super) const TEACHERS: &[(&str, &str, &str, &str)] = &[
    ("John Smith", "Mathematics", "john.smith@eduzone.com", "555-1234"),
    ("Sarah Johnson", "Science", "sarah.johnson@eduzone.com", "555-2345"),
    ("Michael Brown", "English", "michael.brown@eduzone.com", "555-3456"),
    ("Emily Davis", "History", "emily.davis@eduzone.com", "555-4567"),
    ("David Wilson", "Physical Education", "david.wilson@eduzone.com", "555-5678"),
];

const EVENTS: &[(&str, &str, (i32, u32, u32), &str)] = &[
    (
        "Parent-Teacher Conference",
        "Annual parent-teacher conference day",
        (2023, 5, 15),
        "academic",
    ),
    (
        "Science Fair",
        "Annual science fair for all grades",
        (2023, 5, 20),
        "event",
    ),
    ("Field Day", "Outdoor sports and activities", (2023, 5, 25), "event"),
    (
        "Professional Development Day",
        "Teacher training and development",
        (2023, 5, 30),
        "holiday",
    ),
];

const FEEDBACK: &[(&str, &str, &str)] = &[
    (
        "compliment",
        "I wanted to express my appreciation for the wonderful science fair last week. My child had a great time and learned so much!",
        "John Parent",
    ),
    (
        "suggestion",
        "I would like to suggest extending the library hours during exam weeks. This would be very helpful for students who need a quiet place to study.",
        "Mary Student",
    ),
    (
        "compliment",
        "The new technology resources provided to the classrooms have been excellent. The students are more engaged and learning has improved.",
        "Robert Teacher",
    ),
];

pub async fn seed_books(repos: &Repositories) -> Result<usize, SeedError> {
    if !repos.books.list().await?.is_empty() {
        debug!("Books already present, skipping");
        return Ok(0);
    }

    for (title, author, isbn, category, quantity) in BOOKS {
        repos
            .books
            .create(NewBook {
                title: title.to_string(),
                author: author.to_string(),
                isbn: Some(isbn.to_string()),
                category: category.to_string(),
                quantity: *quantity,
            })
            .await?;
    }

    Ok(BOOKS.len())
}

pub async fn seed_teachers(repos: &Repositories) -> Result<usize, SeedError> {
    if !repos.teachers.list().await?.is_empty() {
        debug!("Teachers already present, skipping");
        return Ok(0);
    }

    for (name, subject, email, phone) in TEACHERS {
        repos
            .teachers
            .create(NewTeacher {
                name: name.to_string(),
                subject: subject.to_string(),
                email: email.to_string(),
                phone: Some(phone.to_string()),
            })
            .await?;
    }

    Ok(TEACHERS.len())
}

pub async fn seed_events(repos: &Repositories) -> Result<usize, SeedError> {
    if !repos
        .events
        .list(&EventFilterParams::default())
        .await?
        .is_empty()
    {
        debug!("Calendar events already present, skipping");
        return Ok(0);
    }

    let mut inserted = 0;
    for (title, description, (year, month, day), event_type) in EVENTS {
        let Some(date) = NaiveDate::from_ymd_opt(*year, *month, *day) else {
            continue;
        };

        repos
            .events
            .create(NewEvent {
                title: title.to_string(),
                description: Some(description.to_string()),
                date,
                event_type: event_type.to_string(),
            })
            .await?;
        inserted += 1;
    }

    Ok(inserted)
}

pub async fn seed_feedback(repos: &Repositories) -> Result<usize, SeedError> {
    if !repos.feedback.list().await?.is_empty() {
        debug!("Feedback already present, skipping");
        return Ok(0);
    }

    for (feedback_type, text, user_name) in FEEDBACK {
        repos
            .feedback
            .create(NewFeedback {
                feedback_type: feedback_type.to_string(),
                text: text.to_string(),
                user_id: None,
                user_name: Some(user_name.to_string()),
            })
            .await?;
    }

    Ok(FEEDBACK.len())
}
