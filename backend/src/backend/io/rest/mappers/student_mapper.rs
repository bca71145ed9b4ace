//! backend/src/backend/io/rest/mappers/student_mapper.rs

use crate::backend::domain::commands::marks::AddMarkCommand;
use crate::backend::domain::commands::students::{
    CreateStudentCommand, UpdateProfileCommand, UpdateStudentCommand,
};
use crate::backend::domain::models::mark::Mark as DomainMark;
use crate::backend::domain::models::student::{
    FeeStatus as DomainFeeStatus, Student as DomainStudent, StudentProfile,
};
use shared::{
    AddMarkRequest, CreateStudentRequest, FeeStatus as SharedFeeStatus, Mark as SharedMark,
    PaidStudentSummary, Student as SharedStudent, StudentListResponse, StudentResponse,
    UpdateProfileRequest, UpdateStudentRequest,
};

/// Mapper to convert between shared Student DTOs and domain models.
pub struct StudentMapper;

impl StudentMapper {
    /// Converts a domain profile (student plus marks) to a shared Student DTO.
    pub fn to_dto(profile: StudentProfile) -> SharedStudent {
        let StudentProfile { student, marks } = profile;
        SharedStudent {
            id: student.id,
            index: student.index,
            name: student.name,
            school: student.school,
            badge: student.badge,
            grade: student.grade,
            exam_type: student.exam_type,
            description: student.description,
            email: student.email,
            about_me: student.about_me,
            fee_status: Self::fee_status_to_dto(student.fee_status),
            last_paid_period: student.last_paid_period.map(|period| period.0),
            marks: marks.into_iter().map(Self::mark_to_dto).collect(),
            created_at: student.created_at.to_rfc3339(),
            updated_at: student.updated_at.to_rfc3339(),
        }
    }

    /// Converts a domain mark to a shared Mark DTO.
    pub fn mark_to_dto(mark: DomainMark) -> SharedMark {
        SharedMark {
            term: mark.term,
            subject: mark.subject,
            score: mark.score,
            date: mark.date.to_rfc3339(),
        }
    }

    pub fn fee_status_to_dto(status: DomainFeeStatus) -> SharedFeeStatus {
        match status {
            DomainFeeStatus::Paid => SharedFeeStatus::Paid,
            DomainFeeStatus::Unpaid => SharedFeeStatus::Unpaid,
        }
    }

    pub fn to_student_response_dto(profile: StudentProfile, message: &str) -> StudentResponse {
        StudentResponse {
            student: Self::to_dto(profile),
            success_message: message.to_string(),
        }
    }

    pub fn to_student_list_dto(profiles: Vec<StudentProfile>) -> StudentListResponse {
        StudentListResponse {
            students: profiles.into_iter().map(Self::to_dto).collect(),
        }
    }

    /// Post-payment summary: just enough for the payment page to update.
    pub fn to_paid_summary_dto(student: &DomainStudent) -> PaidStudentSummary {
        PaidStudentSummary {
            index: student.index.clone(),
            fee_status: Self::fee_status_to_dto(student.fee_status),
        }
    }

    pub fn to_create_command(request: CreateStudentRequest) -> CreateStudentCommand {
        CreateStudentCommand {
            index: request.index,
            name: request.name,
            school: request.school,
            badge: request.badge,
            grade: request.grade,
            exam_type: request.exam_type,
            description: request.description,
        }
    }

    pub fn to_update_command(request: UpdateStudentRequest) -> UpdateStudentCommand {
        UpdateStudentCommand {
            name: request.name,
            school: request.school,
            badge: request.badge,
            grade: request.grade,
            exam_type: request.exam_type,
            description: request.description,
        }
    }

    pub fn to_profile_command(request: UpdateProfileRequest) -> UpdateProfileCommand {
        UpdateProfileCommand {
            email: request.email,
            about_me: request.about_me,
        }
    }

    pub fn to_mark_command(request: AddMarkRequest) -> AddMarkCommand {
        AddMarkCommand {
            term: request.term,
            subject: request.subject,
            score: request.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::period::Period;
    use chrono::Utc;

    fn profile_fixture() -> StudentProfile {
        let now = Utc::now();
        StudentProfile {
            student: DomainStudent {
                id: "student::1700000000000".to_string(),
                index: "ST-001".to_string(),
                name: "Alice Silva".to_string(),
                school: "Central College".to_string(),
                badge: "A1".to_string(),
                grade: "11".to_string(),
                exam_type: "OL".to_string(),
                description: String::new(),
                email: Some("alice@example.com".to_string()),
                about_me: None,
                fee_status: DomainFeeStatus::Paid,
                last_paid_period: Some(Period(7)),
                created_at: now,
                updated_at: now,
            },
            marks: vec![DomainMark {
                term: "Term 1".to_string(),
                subject: "Mathematics".to_string(),
                score: 88.5,
                date: now,
            }],
        }
    }

    #[test]
    fn test_to_dto_carries_fee_fields_and_marks() {
        let profile = profile_fixture();
        let created_at = profile.student.created_at;

        let dto = StudentMapper::to_dto(profile);

        assert_eq!(dto.fee_status, SharedFeeStatus::Paid);
        assert_eq!(dto.last_paid_period, Some(7));
        assert_eq!(dto.marks.len(), 1);
        assert_eq!(dto.marks[0].subject, "Mathematics");
        assert_eq!(dto.created_at, created_at.to_rfc3339());
    }

    #[test]
    fn test_fee_status_serializes_to_wire_values() {
        let paid = StudentMapper::fee_status_to_dto(DomainFeeStatus::Paid);
        let unpaid = StudentMapper::fee_status_to_dto(DomainFeeStatus::Unpaid);

        assert_eq!(serde_json::to_string(&paid).unwrap(), "\"PAID\"");
        assert_eq!(serde_json::to_string(&unpaid).unwrap(), "\"UNPAID\"");
    }
}
