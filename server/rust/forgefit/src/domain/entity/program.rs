use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Program は会員ダッシュボードに並ぶトレーニングプログラム。内容は固定データ。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub workouts: u32,
    pub duration: &'static str,
    pub completed: bool,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub difficulty: Difficulty,
    pub completed: bool,
    pub locked: bool,
}

// (id, title, description, workouts, duration, locked)
const PROGRAMS: [(&str, &str, &str, u32, &str, bool); 6] = [
    (
        "strength-foundation",
        "Strength Foundation",
        "Build a solid foundation with fundamental strength training exercises.",
        12,
        "4 weeks",
        false,
    ),
    (
        "muscle-building",
        "Muscle Building Program",
        "Progressive overload training designed to maximize muscle growth.",
        16,
        "6 weeks",
        false,
    ),
    (
        "fat-loss-blast",
        "Fat Loss Blast",
        "High-intensity workouts combined with metabolic training.",
        14,
        "5 weeks",
        false,
    ),
    (
        "athletic-performance",
        "Athletic Performance",
        "Sport-specific training to enhance athletic capabilities.",
        18,
        "8 weeks",
        true,
    ),
    (
        "powerlifting-prep",
        "Powerlifting Prep",
        "Competition preparation for squat, bench, and deadlift.",
        20,
        "10 weeks",
        true,
    ),
    (
        "advanced-bodybuilding",
        "Advanced Bodybuilding",
        "Advanced techniques for experienced lifters seeking maximum gains.",
        24,
        "12 weeks",
        true,
    ),
];

type WorkoutRow = (&'static str, &'static str, &'static str, &'static str, Difficulty, bool);

use Difficulty::{Advanced, Beginner, Intermediate};

// (id, title, description, duration, difficulty, locked)
const STRENGTH_FOUNDATION: [WorkoutRow; 12] = [
    ("1", "Full Body Introduction", "Basic movements and form", "45min", Beginner, false),
    ("2", "Upper Body Focus", "Push and pull movements", "50min", Beginner, false),
    ("3", "Lower Body Power", "Squats and hip hinges", "48min", Beginner, false),
    ("4", "Core Stability", "Functional core training", "35min", Beginner, false),
    ("5", "Movement Patterns", "Compound movement practice", "52min", Beginner, true),
    ("6", "Progressive Overload", "Adding weight and intensity", "55min", Intermediate, true),
    ("7", "Upper Body Strength", "Building pressing power", "48min", Intermediate, true),
    ("8", "Lower Body Power", "Explosive leg movements", "50min", Intermediate, true),
    ("9", "Full Body Integration", "Combining all movements", "58min", Intermediate, true),
    ("10", "Strength Assessment", "Testing your progress", "45min", Intermediate, true),
    ("11", "Advanced Variations", "Complex movement patterns", "60min", Advanced, true),
    ("12", "Foundation Mastery", "Final strength challenge", "55min", Advanced, true),
];

const MUSCLE_BUILDING: [WorkoutRow; 6] = [
    ("1", "Hypertrophy Basics", "Understanding muscle growth", "50min", Beginner, false),
    ("2", "Push Day Fundamentals", "Chest, shoulders, triceps", "55min", Beginner, false),
    ("3", "Pull Day Power", "Back and bicep development", "52min", Beginner, false),
    ("4", "Leg Day Launch", "Quad and glute focus", "58min", Beginner, false),
    ("5", "Upper Body Volume", "High volume training", "60min", Intermediate, true),
    ("6", "Lower Body Mass", "Building leg muscle", "62min", Intermediate, true),
];

const FAT_LOSS_BLAST: [WorkoutRow; 5] = [
    ("1", "HIIT Introduction", "High intensity basics", "25min", Beginner, false),
    ("2", "Metabolic Circuit", "Fat burning circuits", "30min", Beginner, false),
    ("3", "Cardio Strength Combo", "Combining cardio and weights", "35min", Beginner, false),
    ("4", "Tabata Training", "4-minute fat burners", "20min", Intermediate, false),
    ("5", "Full Body HIIT", "Complete body conditioning", "40min", Intermediate, true),
];

/// 全プログラムを表示順に返す。
pub fn program_catalog() -> Vec<Program> {
    PROGRAMS
        .iter()
        .map(|&(id, title, description, workouts, duration, locked)| Program {
            id,
            title,
            description,
            workouts,
            duration,
            completed: false,
            locked,
        })
        .collect()
}

/// プログラムのワークアウト一覧。一覧を持たないプログラムや未知の ID は空になる。
pub fn workouts_for(program_id: &str) -> Vec<Workout> {
    let rows: &[WorkoutRow] = match program_id {
        "strength-foundation" => &STRENGTH_FOUNDATION,
        "muscle-building" => &MUSCLE_BUILDING,
        "fat-loss-blast" => &FAT_LOSS_BLAST,
        _ => &[],
    };
    rows.iter()
        .map(|&(id, title, description, duration, difficulty, locked)| Workout {
            id,
            title,
            description,
            duration,
            difficulty,
            completed: false,
            locked,
        })
        .collect()
}
