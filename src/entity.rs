//! Static description of each entity table: names, route prefix and response messages.

/// Everything that differs between the student and lecturer endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityDef {
    /// Lowercase singular, used in logs and errors ("student").
    pub name: &'static str,
    /// Capitalized singular, used in messages and the `get<Label>` route ("Student").
    pub label: &'static str,
    /// Capitalized plural, used in failure messages ("Students").
    pub plural: &'static str,
    pub table: &'static str,
    /// Mount point of the entity's routes ("/student").
    pub path_prefix: &'static str,
}

pub const STUDENTS: EntityDef = EntityDef {
    name: "student",
    label: "Student",
    plural: "Students",
    table: "students",
    path_prefix: "/student",
};

pub const LECTURERS: EntityDef = EntityDef {
    name: "lecturer",
    label: "Lecturer",
    plural: "Lecturers",
    table: "lecturers",
    path_prefix: "/lecturer",
};

/// Every entity served by the API.
pub const ALL: [EntityDef; 2] = [STUDENTS, LECTURERS];

/// Fixed failure message when a path id cannot be parsed on delete.
pub const ID_ERROR: &str = "Error Getting The ID";

impl EntityDef {
    pub fn queried_message(&self) -> String {
        format!("{} Queried Successfully", self.label)
    }

    pub fn created_message(&self) -> String {
        format!("{} Created Successfully", self.label)
    }

    pub fn updated_message(&self) -> String {
        format!("{} Updated Successfully", self.label)
    }

    pub fn deleted_message(&self) -> String {
        format!("{} Deleted Successfully", self.label)
    }

    /// Generic failure message. The trailing space is part of the wire contract.
    pub fn get_error_message(&self) -> String {
        format!("Error Getting {} ", self.plural)
    }

    pub fn delete_error_message(&self) -> String {
        format!("Error Deleting {}", self.label)
    }

    /// Path of the single-record read, relative to the prefix ("/getStudent/:id").
    pub fn read_route(&self) -> String {
        format!("/get{}/:id", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_messages() {
        assert_eq!(STUDENTS.created_message(), "Student Created Successfully");
        assert_eq!(STUDENTS.queried_message(), "Student Queried Successfully");
        assert_eq!(STUDENTS.get_error_message(), "Error Getting Students ");
        assert_eq!(STUDENTS.delete_error_message(), "Error Deleting Student");
        assert_eq!(STUDENTS.read_route(), "/getStudent/:id");
    }

    #[test]
    fn lecturer_messages() {
        assert_eq!(LECTURERS.updated_message(), "Lecturer Updated Successfully");
        assert_eq!(LECTURERS.deleted_message(), "Lecturer Deleted Successfully");
        assert_eq!(LECTURERS.get_error_message(), "Error Getting Lecturers ");
        assert_eq!(LECTURERS.read_route(), "/getLecturer/:id");
    }
}
