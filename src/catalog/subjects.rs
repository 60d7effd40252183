//! Subject catalog shown on the subjects view.

use serde::Serialize;

/// Image used for shared games whose subject is not in the catalog.
pub const DEFAULT_COMMUNITY_IMAGE: &str =
    "https://images.unsplash.com/photo-1588345921523-c2dcdb7f1d08?q=80&w=400&auto=format&fit=crop";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub title: &'static str,
    pub image_url: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub subjects: &'static [Subject],
}

pub static CATEGORIES: &[Category] = &[
    Category {
        name: "Sciences",
        subjects: &[
            Subject {
                title: "Physics",
                image_url: "https://images.unsplash.com/photo-1636466497217-26a8cbeaf0aa?q=80&w=400&auto=format&fit=crop",
            },
            Subject {
                title: "Chemistry",
                image_url: "https://images.unsplash.com/photo-1603126857599-f6e157fa2fe6?q=80&w=400&auto=format&fit=crop",
            },
            Subject {
                title: "Biology",
                image_url: "https://images.unsplash.com/photo-1530026405186-ed1f139313f8?q=80&w=400&auto=format&fit=crop",
            },
        ],
    },
    Category {
        name: "Mathematics",
        subjects: &[
            Subject {
                title: "Calculus",
                image_url: "https://images.unsplash.com/photo-1635070041078-e363dbe005cb?q=80&w=400&auto=format&fit=crop",
            },
            Subject {
                title: "Statistics",
                image_url: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?q=80&w=400&auto=format&fit=crop",
            },
            Subject {
                title: "Linear Algebra",
                image_url: "https://images.unsplash.com/photo-1509228468518-180dd4864904?q=80&w=400&auto=format&fit=crop",
            },
        ],
    },
    Category {
        name: "Humanities",
        subjects: &[
            Subject {
                title: "History",
                image_url: "https://images.unsplash.com/photo-1461360370896-922624d12aa1?q=80&w=400&auto=format&fit=crop",
            },
            Subject {
                title: "Philosophy",
                image_url: "https://images.unsplash.com/photo-1544947950-fa07a98d237f?q=80&w=400&auto=format&fit=crop",
            },
            Subject {
                title: "Music Theory",
                image_url: "https://images.unsplash.com/photo-1507838153414-b4b713384a76?q=80&w=400&auto=format&fit=crop",
            },
        ],
    },
    Category {
        name: "Computing",
        subjects: &[
            Subject {
                title: "Algorithms",
                image_url: "https://images.unsplash.com/photo-1555066931-4365d14bab8c?q=80&w=400&auto=format&fit=crop",
            },
            Subject {
                title: "Computer Networks",
                image_url: "https://images.unsplash.com/photo-1558494949-ef010cbdcc31?q=80&w=400&auto=format&fit=crop",
            },
        ],
    },
];

pub fn all_subjects() -> impl Iterator<Item = &'static Subject> {
    CATEGORIES.iter().flat_map(|category| category.subjects.iter())
}

/// Exact title match; absence is expected for custom subjects.
pub fn image_for_subject(title: &str) -> Option<&'static str> {
    all_subjects()
        .find(|subject| subject.title == title)
        .map(|subject| subject.image_url)
}
