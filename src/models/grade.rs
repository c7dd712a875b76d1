//! Pay grades.

use serde::{Deserialize, Serialize};

/// Possible grades an employee can be employed at.
///
/// The serde spellings (`GRADE_2` and so on) match the names used in the
/// salary scale data files. An employee without a grade (for example one on
/// an off-scale salary) is represented as `Option<Grade>::None` at the API
/// boundary and receives no anniversary increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// "T" grade.
    #[serde(rename = "T_GRADE")]
    TGrade,
    /// Grade 1.
    #[serde(rename = "GRADE_1")]
    Grade1,
    /// Grade 2.
    #[serde(rename = "GRADE_2")]
    Grade2,
    /// Grade 3.
    #[serde(rename = "GRADE_3")]
    Grade3,
    /// Grade 4.
    #[serde(rename = "GRADE_4")]
    Grade4,
    /// Grade 5.
    #[serde(rename = "GRADE_5")]
    Grade5,
    /// Grade 6.
    #[serde(rename = "GRADE_6")]
    Grade6,
    /// Grade 7.
    #[serde(rename = "GRADE_7")]
    Grade7,
    /// Grade 8.
    #[serde(rename = "GRADE_8")]
    Grade8,
    /// Grade 9.
    #[serde(rename = "GRADE_9")]
    Grade9,
    /// Grade 10.
    #[serde(rename = "GRADE_10")]
    Grade10,
    /// Grade 11.
    #[serde(rename = "GRADE_11")]
    Grade11,
    /// Grade 12, band 1.
    #[serde(rename = "GRADE_12_BAND_1")]
    Grade12Band1,
    /// Grade 12, band 2.
    #[serde(rename = "GRADE_12_BAND_2")]
    Grade12Band2,
    /// Grade 12, band 3.
    #[serde(rename = "GRADE_12_BAND_3")]
    Grade12Band3,
    /// Grade 12, band 4.
    #[serde(rename = "GRADE_12_BAND_4")]
    Grade12Band4,
    /// Clinical nodal points.
    #[serde(rename = "CLINICAL_NODAL")]
    ClinicalNodal,
    /// Clinical consultant.
    #[serde(rename = "CLINICAL_CONSULTANT")]
    ClinicalConsultant,
    /// Clinical research associate or lecturer.
    #[serde(rename = "CLINICAL_RA_AND_LECTURER")]
    ClinicalRaAndLecturer,
}
