// backend/src/backend/domain/commands.rs

//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod students {
    /// Input for creating a new student record.
    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub index: String,
        pub name: String,
        pub school: String,
        pub badge: String,
        pub grade: String,
        pub exam_type: String,
        pub description: Option<String>,
    }

    /// Partial update from the admin surface. Absent fields keep their
    /// current values.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateStudentCommand {
        pub name: Option<String>,
        pub school: Option<String>,
        pub badge: Option<String>,
        pub grade: Option<String>,
        pub exam_type: Option<String>,
        pub description: Option<String>,
    }

    /// Student-editable profile fields.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateProfileCommand {
        pub email: Option<String>,
        pub about_me: Option<String>,
    }
}

pub mod marks {
    use crate::backend::domain::models::mark::Mark as DomainMark;

    /// Input for recording a new exam mark.
    #[derive(Debug, Clone)]
    pub struct AddMarkCommand {
        pub term: String,
        pub subject: String,
        pub score: f64,
    }

    /// Result of recording a mark: the refreshed mark list.
    #[derive(Debug, Clone)]
    pub struct AddMarkResult {
        pub marks: Vec<DomainMark>,
        pub success_message: String,
    }
}

pub mod admins {
    use crate::backend::domain::models::admin::Admin as DomainAdmin;

    /// Input for the mock admin login.
    #[derive(Debug, Clone)]
    pub struct LoginAdminCommand {
        pub mobile: String,
    }

    /// Result of a login: the (possibly just created) admin record.
    /// The access token is attached by the IO layer, which owns the
    /// authorization policy.
    #[derive(Debug, Clone)]
    pub struct LoginAdminResult {
        pub admin: DomainAdmin,
    }
}

pub mod payments {
    use crate::backend::domain::models::student::Student as DomainStudent;

    /// Input for the mock fee payment flow.
    #[derive(Debug, Clone)]
    pub struct PayFeeCommand {
        pub index: String,
        pub amount: f64,
    }

    /// Result of a successful payment.
    #[derive(Debug, Clone)]
    pub struct PayFeeResult {
        pub message: String,
        pub transaction_id: String,
        pub student: DomainStudent,
    }
}
