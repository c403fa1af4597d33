//! Diesel table definitions for student storage.

diesel::table! {
    /// Student records; `email` carries a unique constraint.
    students (id) {
        /// Sequence-assigned identifier.
        id -> Int8,
        /// Given name.
        #[max_length = 100]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 100]
        last_name -> Varchar,
        /// Unique contact address.
        #[max_length = 255]
        email -> Varchar,
        /// Calendar date the student joined.
        enrollment_date -> Date,
    }
}

diesel::table! {
    /// One row per (student, course) enrollment.
    student_courses (student_id, course) {
        /// Owning student.
        student_id -> Int8,
        /// Machine course name.
        #[max_length = 64]
        course -> Varchar,
    }
}

diesel::joinable!(student_courses -> students (student_id));
diesel::allow_tables_to_appear_in_same_query!(students, student_courses);
