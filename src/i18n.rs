//! Bilingual labels (Bahasa Melayu / English), localized date formatting and
//! the primary/English text fallback used by every view.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ms,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ms => "ms",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ms" | "ms-my" | "bm" => Some(Language::Ms),
            "en" | "en-us" | "en-gb" => Some(Language::En),
            _ => None,
        }
    }

    /// Look up a label; unknown keys come back unchanged.
    pub fn t<'a>(self, key: &'a str) -> &'a str {
        match TABLE.get(key) {
            Some((ms, en)) => match self {
                Language::Ms => ms,
                Language::En => en,
            },
            None => key,
        }
    }
}

impl TryFrom<String> for Language {
    type Error = crate::models::ParseEnumError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Language::from_code(&code).ok_or_else(|| crate::models::ParseEnumError::new("Language", &code))
    }
}

/// Pick the English variant when the locale is English and a non-blank
/// translation exists; otherwise the primary (Malay) text.
pub fn resolve_localized_text<'a>(
    primary: &'a str,
    translated: Option<&'a str>,
    locale: Language,
) -> &'a str {
    match (locale, translated) {
        (Language::En, Some(en)) if !en.trim().is_empty() => en,
        _ => primary,
    }
}

const MONTHS_MS: [&str; 12] = [
    "Jan", "Feb", "Mac", "Apr", "Mei", "Jun", "Jul", "Ogo", "Sep", "Okt", "Nov", "Dis",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_name(lang: Language, month0: u32) -> &'static str {
    let idx = month0 as usize % 12;
    match lang {
        Language::Ms => MONTHS_MS[idx],
        Language::En => MONTHS_EN[idx],
    }
}

/// `16 Okt 2026`
pub fn format_day(date: NaiveDate, lang: Language) -> String {
    format!("{:02} {} {}", date.day(), month_name(lang, date.month0()), date.year())
}

/// Calendar date of a timestamp in the portal's timezone.
pub fn format_date(ts: &DateTime<Utc>, offset: &FixedOffset, lang: Language) -> String {
    format_day(ts.with_timezone(offset).date_naive(), lang)
}

/// `16 Okt 2026, 14:30`
pub fn format_datetime(ts: &DateTime<Utc>, offset: &FixedOffset, lang: Language) -> String {
    let local = ts.with_timezone(offset);
    format!("{}, {}", format_day(local.date_naive(), lang), local.format("%H:%M"))
}

static TABLE: LazyLock<HashMap<&'static str, (&'static str, &'static str)>> =
    LazyLock::new(|| ENTRIES.iter().map(|(k, ms, en)| (*k, (*ms, *en))).collect());

#[rustfmt::skip]
const ENTRIES: &[(&str, &str, &str)] = &[
    // Navigation
    ("nav.dashboard", "Papan Pemuka", "Dashboard"),
    ("nav.meetings", "Mesyuarat MBJ", "MBJ Meetings"),
    ("nav.decisions", "Keputusan", "Decisions"),
    ("nav.complaints", "Aduan & Cadangan", "Complaints & Suggestions"),
    ("nav.announcements", "Pengumuman", "Announcements"),
    ("nav.admin", "Pentadbiran", "Administration"),
    ("nav.profile", "Profil", "Profile"),
    ("nav.logout", "Log Keluar", "Log Out"),
    ("nav.login", "Log Masuk", "Log In"),

    // Common
    ("common.search", "Cari...", "Search..."),
    ("common.submit", "Hantar", "Submit"),
    ("common.cancel", "Batal", "Cancel"),
    ("common.save", "Simpan", "Save"),
    ("common.edit", "Edit", "Edit"),
    ("common.delete", "Padam", "Delete"),
    ("common.view", "Lihat", "View"),
    ("common.status", "Status", "Status"),
    ("common.date", "Tarikh", "Date"),
    ("common.actions", "Tindakan", "Actions"),
    ("common.loading", "Memuatkan...", "Loading..."),
    ("common.noData", "Tiada data", "No data available"),
    ("common.all", "Semua", "All"),
    ("common.filter", "Tapis", "Filter"),
    ("common.confirm", "Sahkan", "Confirm"),
    ("common.back", "Kembali", "Back"),
    ("common.total", "Jumlah", "Total"),
    ("common.success", "Berjaya", "Success"),
    ("common.error", "Ralat", "Error"),
    ("common.category", "Kategori", "Category"),
    ("common.priority", "Keutamaan", "Priority"),
    ("common.type", "Jenis", "Type"),
    ("common.showing", "Menunjukkan", "Showing"),
    ("common.of", "daripada", "of"),

    // Landing
    ("landing.tagline", "Portal digital untuk pengurusan Majlis Bersama Jabatan", "Digital portal for Joint Departmental Council management"),
    ("landing.getStarted", "Mula Sekarang", "Get Started"),
    ("landing.featureMeetings", "Jadual dan minit mesyuarat MBJ", "MBJ meeting schedules and minutes"),
    ("landing.featureDecisions", "Jejak pelaksanaan keputusan", "Track decision implementation"),
    ("landing.featureComplaints", "Hantar aduan dan cadangan", "Submit complaints and suggestions"),
    ("landing.featureAnnouncements", "Pengumuman terkini warga kerja", "Latest staff announcements"),

    // Dashboard
    ("dashboard.title", "Papan Pemuka", "Dashboard"),
    ("dashboard.welcome", "Selamat Datang ke Portal Digital MBJ", "Welcome to MBJ Digital Portal"),
    ("dashboard.greeting", "Selamat Datang", "Welcome"),
    ("dashboard.totalStaff", "Jumlah Anggota", "Total Staff"),
    ("dashboard.pendingComplaints", "Aduan Tertunda", "Pending Complaints"),
    ("dashboard.scheduledMeetings", "Mesyuarat Dijadualkan", "Scheduled Meetings"),
    ("dashboard.totalDecisions", "Jumlah Keputusan", "Total Decisions"),
    ("dashboard.recentAnnouncements", "Pengumuman Terkini", "Recent Announcements"),
    ("dashboard.recentComplaints", "Aduan Terkini", "Recent Complaints"),
    ("dashboard.quickActions", "Tindakan Pantas", "Quick Actions"),
    ("dashboard.viewAll", "Lihat Semua", "View All"),

    // Meetings
    ("meetings.title", "Mesyuarat MBJ", "MBJ Meetings"),
    ("meetings.upcoming", "Mesyuarat Akan Datang", "Upcoming Meetings"),
    ("meetings.past", "Mesyuarat Lepas", "Past Meetings"),
    ("meetings.scheduled", "Dijadualkan", "Scheduled"),
    ("meetings.completed", "Selesai", "Completed"),
    ("meetings.cancelled", "Dibatalkan", "Cancelled"),
    ("meetings.addNew", "Tambah Mesyuarat", "Add Meeting"),
    ("meetings.editMeeting", "Edit Mesyuarat", "Edit Meeting"),
    ("meetings.viewMinutes", "Lihat Minit", "View Minutes"),
    ("meetings.viewDecisions", "Lihat Keputusan", "View Decisions"),
    ("meetings.titleMs", "Tajuk (BM)", "Title (BM)"),
    ("meetings.titleEn", "Tajuk (EN)", "Title (EN)"),
    ("meetings.titlePlaceholder", "Masukkan tajuk mesyuarat", "Enter meeting title"),
    ("meetings.titlePlaceholderEn", "Enter meeting title", "Enter meeting title"),
    ("meetings.descriptionMs", "Keterangan (BM)", "Description (BM)"),
    ("meetings.descriptionEn", "Keterangan (EN)", "Description (EN)"),
    ("meetings.description", "Keterangan", "Description"),
    ("meetings.date", "Tarikh & Masa", "Date & Time"),
    ("meetings.location", "Lokasi", "Location"),
    ("meetings.locationPlaceholder", "Cth: Bilik Mesyuarat Utama", "E.g: Main Meeting Room"),
    ("meetings.minutes", "Minit Mesyuarat", "Meeting Minutes"),
    ("meetings.uploadMinutes", "Muat naik minit mesyuarat", "Upload meeting minutes"),
    ("meetings.existingMinutes", "Minit sedia ada", "Existing minutes"),
    ("meetings.removeMinutes", "Buang minit", "Remove minutes"),
    ("meetings.fileTooLarge", "Fail terlalu besar (max 10MB)", "File too large (max 10MB)"),
    ("meetings.uploadError", "Gagal memuat naik fail", "Failed to upload file"),
    ("meetings.createSuccess", "Mesyuarat berjaya dicipta", "Meeting created successfully"),
    ("meetings.updateSuccess", "Mesyuarat berjaya dikemaskini", "Meeting updated successfully"),
    ("meetings.deleteSuccess", "Mesyuarat berjaya dipadam", "Meeting deleted successfully"),
    ("meetings.saveError", "Gagal menyimpan mesyuarat", "Failed to save meeting"),
    ("meetings.deleteError", "Gagal memadam mesyuarat", "Failed to delete meeting"),
    ("meetings.confirmDelete", "Padam Mesyuarat?", "Delete Meeting?"),
    ("meetings.deleteWarning", "Tindakan ini tidak boleh dibatalkan. Semua keputusan berkaitan juga akan dipadam.", "This action cannot be undone. All related decisions will also be deleted."),
    ("meetings.decisions", "Keputusan", "Decisions"),
    ("meetings.noDecisions", "Tiada keputusan untuk mesyuarat ini", "No decisions for this meeting"),

    // Decisions
    ("decisions.title", "Keputusan MBJ", "MBJ Decisions"),
    ("decisions.pending", "Tertunda", "Pending"),
    ("decisions.inProgress", "Dalam Proses", "In Progress"),
    ("decisions.completed", "Selesai", "Completed"),
    ("decisions.overdue", "Terlewat", "Overdue"),
    ("decisions.addNew", "Tambah Keputusan", "Add Decision"),
    ("decisions.editDecision", "Edit Keputusan", "Edit Decision"),
    ("decisions.number", "Nombor Keputusan", "Decision Number"),
    ("decisions.titleMs", "Tajuk (BM)", "Title (BM)"),
    ("decisions.titleEn", "Tajuk (EN)", "Title (EN)"),
    ("decisions.descriptionMs", "Keterangan (BM)", "Description (BM)"),
    ("decisions.descriptionEn", "Keterangan (EN)", "Description (EN)"),
    ("decisions.responsibleParty", "Pihak Bertanggungjawab", "Responsible Party"),
    ("decisions.responsiblePlaceholder", "Cth: Bahagian Pentadbiran", "E.g: Administration Division"),
    ("decisions.dueDate", "Tarikh Akhir", "Due Date"),
    ("decisions.meeting", "Mesyuarat", "Meeting"),
    ("decisions.noMeeting", "Tiada mesyuarat", "No meeting"),
    ("decisions.createSuccess", "Keputusan berjaya dicipta", "Decision created successfully"),
    ("decisions.updateSuccess", "Keputusan berjaya dikemaskini", "Decision updated successfully"),
    ("decisions.deleteSuccess", "Keputusan berjaya dipadam", "Decision deleted successfully"),
    ("decisions.saveError", "Gagal menyimpan keputusan", "Failed to save decision"),
    ("decisions.deleteError", "Gagal memadam keputusan", "Failed to delete decision"),
    ("decisions.confirmDelete", "Padam Keputusan?", "Delete Decision?"),
    ("decisions.deleteWarning", "Tindakan ini tidak boleh dibatalkan.", "This action cannot be undone."),

    // Complaints
    ("complaints.title", "Aduan & Cadangan", "Complaints & Suggestions"),
    ("complaints.list", "Senarai Aduan & Cadangan", "Complaints & Suggestions List"),
    ("complaints.new", "Aduan Baru", "New Complaint"),
    ("complaints.complaint", "Aduan", "Complaint"),
    ("complaints.complaints", "Aduan", "Complaints"),
    ("complaints.suggestion", "Cadangan", "Suggestion"),
    ("complaints.suggestions", "Cadangan", "Suggestions"),
    ("complaints.pending", "Tertunda", "Pending"),
    ("complaints.inProgress", "Dalam Siasatan", "Under Investigation"),
    ("complaints.resolved", "Selesai", "Resolved"),
    ("complaints.rejected", "Ditolak", "Rejected"),
    ("complaints.submitNew", "Hantar Aduan/Cadangan", "Submit Complaint/Suggestion"),
    ("complaints.track", "Jejak Status", "Track Status"),
    ("complaints.reference", "No. Rujukan", "Reference No."),
    ("complaints.category", "Kategori", "Category"),
    ("complaints.subject", "Subjek", "Subject"),
    ("complaints.description", "Keterangan", "Description"),
    ("complaints.priority", "Keutamaan", "Priority"),
    ("complaints.resolution", "Maklum Balas / Penyelesaian", "Response / Resolution"),
    ("complaints.resolutionPlaceholder", "Nyatakan maklum balas atau tindakan yang diambil...", "State the response or action taken..."),
    ("complaints.resolvedOn", "Diselesaikan pada", "Resolved on"),
    ("complaints.submittedBy", "Dihantar Oleh", "Submitted By"),
    ("complaints.committeeActions", "Tindakan Jawatankuasa", "Committee Actions"),
    ("complaints.updateStatus", "Kemaskini Status", "Update Status"),
    ("complaints.statusUpdated", "Status telah dikemaskini", "Status has been updated"),
    ("complaints.submitSuccess", "Aduan/cadangan berjaya dihantar", "Complaint/suggestion submitted successfully"),
    ("complaints.searchPlaceholder", "Cari subjek atau no. rujukan...", "Search subject or reference no..."),
    ("complaints.resolutionRequired", "Maklum balas diperlukan untuk status ini", "A response is required for this status"),
    ("complaints.alreadyClosed", "Aduan ini telah ditutup", "This complaint is already closed"),
    ("complaints.category.welfare", "Kebajikan", "Welfare"),
    ("complaints.category.facilities", "Kemudahan", "Facilities"),
    ("complaints.category.hr", "Sumber Manusia", "Human Resources"),
    ("complaints.category.finance", "Kewangan", "Finance"),
    ("complaints.category.safety", "Keselamatan", "Safety"),
    ("complaints.category.others", "Lain-lain", "Others"),

    // Priorities
    ("priority.low", "Rendah", "Low"),
    ("priority.normal", "Biasa", "Normal"),
    ("priority.high", "Tinggi", "High"),
    ("priority.urgent", "Segera", "Urgent"),

    // Announcements
    ("announcements.title", "Pengumuman", "Announcements"),
    ("announcements.latest", "Pengumuman Terkini", "Latest Announcements"),
    ("announcements.pinned", "Pengumuman Penting", "Important Announcements"),
    ("announcements.pinnedShort", "Penting", "Pinned"),
    ("announcements.thisMonth", "Bulan Ini", "This Month"),
    ("announcements.new", "Pengumuman Baru", "New Announcement"),
    ("announcements.edit", "Edit Pengumuman", "Edit Announcement"),
    ("announcements.delete", "Padam Pengumuman", "Delete Announcement"),
    ("announcements.publish", "Terbitkan", "Publish"),
    ("announcements.publishedAt", "Tarikh Terbit", "Publish Date"),
    ("announcements.expires", "Tarikh Tamat", "Expiry Date"),
    ("announcements.expiryAfterPublish", "Tarikh tamat mesti selepas tarikh terbit", "Expiry date must be after the publish date"),
    ("announcements.isPinned", "Sematkan di atas", "Pin to top"),
    ("announcements.titleMs", "Tajuk (BM)", "Title (BM)"),
    ("announcements.titleEn", "Tajuk (EN)", "Title (EN)"),
    ("announcements.contentMs", "Kandungan (BM)", "Content (BM)"),
    ("announcements.contentEn", "Kandungan (EN)", "Content (EN)"),
    ("announcements.createSuccess", "Pengumuman berjaya diterbitkan", "Announcement published successfully"),
    ("announcements.updateSuccess", "Pengumuman berjaya dikemaskini", "Announcement updated successfully"),
    ("announcements.deleteSuccess", "Pengumuman berjaya dipadam", "Announcement deleted successfully"),
    ("announcements.confirmDelete", "Padam Pengumuman?", "Delete Announcement?"),
    ("announcements.deleteWarning", "Tindakan ini tidak boleh dibatalkan.", "This action cannot be undone."),
    ("announcements.category.general", "Umum", "General"),
    ("announcements.category.urgent", "Segera", "Urgent"),
    ("announcements.category.event", "Acara", "Event"),
    ("announcements.category.policy", "Polisi", "Policy"),
    ("announcements.category.welfare", "Kebajikan", "Welfare"),
    ("announcements.category.hr", "Sumber Manusia", "Human Resources"),

    // Admin
    ("admin.title", "Panel Pentadbiran", "Administration Panel"),
    ("admin.users", "Pengurusan Pengguna", "User Management"),
    ("admin.userList", "Senarai Pengguna", "User List"),
    ("admin.roles", "Peranan", "Roles"),
    ("admin.allRoles", "Semua Peranan", "All Roles"),
    ("admin.auditLog", "Log Audit", "Audit Log"),
    ("admin.totalUsers", "Jumlah Pengguna", "Total Users"),
    ("admin.changeRole", "Tukar Peranan", "Change Role"),
    ("admin.changeRoleQuestion", "Adakah anda pasti untuk menukar peranan pengguna ini?", "Are you sure you want to change this user's role?"),
    ("admin.confirmChange", "Sahkan Perubahan", "Confirm Change"),
    ("admin.roleUpdated", "Peranan berjaya dikemaskini", "Role updated successfully"),
    ("admin.roleUpdateError", "Gagal mengemaskini peranan", "Failed to update role"),
    ("admin.cannotChangeOwnRole", "Anda tidak boleh menukar peranan anda sendiri", "You cannot change your own role"),
    ("admin.you", "(Anda)", "(You)"),
    ("admin.noUsers", "Tiada pengguna dijumpai", "No users found"),
    ("admin.name", "Nama", "Name"),
    ("admin.email", "Emel", "Email"),
    ("admin.entity", "Entiti", "Entity"),
    ("admin.action", "Tindakan", "Action"),
    ("admin.actor", "Pengguna", "User"),
    ("admin.accessDenied", "Akses Ditolak", "Access Denied"),
    ("admin.noPermission", "Anda tidak mempunyai kebenaran untuk mengakses halaman ini.", "You do not have permission to access this page."),

    // Audit actions and entities
    ("audit.action.create", "Cipta", "Create"),
    ("audit.action.update", "Kemaskini", "Update"),
    ("audit.action.delete", "Padam", "Delete"),
    ("audit.action.login", "Log Masuk", "Login"),
    ("audit.action.logout", "Log Keluar", "Logout"),
    ("audit.entity.complaints", "Aduan", "Complaints"),
    ("audit.entity.announcements", "Pengumuman", "Announcements"),
    ("audit.entity.meetings", "Mesyuarat", "Meetings"),
    ("audit.entity.decisions", "Keputusan", "Decisions"),
    ("audit.entity.profiles", "Profil", "Profiles"),
    ("audit.entity.user_roles", "Peranan", "Roles"),
    ("audit.entity.accounts", "Akaun", "Accounts"),

    // Auth
    ("auth.login", "Log Masuk", "Log In"),
    ("auth.logout", "Log Keluar", "Log Out"),
    ("auth.email", "Emel", "Email"),
    ("auth.password", "Kata Laluan", "Password"),
    ("auth.confirmPassword", "Sahkan Kata Laluan", "Confirm Password"),
    ("auth.register", "Daftar", "Register"),
    ("auth.noAccount", "Tiada akaun?", "Don't have an account?"),
    ("auth.hasAccount", "Sudah ada akaun?", "Already have an account?"),
    ("auth.fullName", "Nama Penuh", "Full Name"),
    ("auth.invalidCredentials", "Emel atau kata laluan tidak sah", "Invalid email or password"),
    ("auth.tooManyAttempts", "Terlalu banyak percubaan. Sila cuba sebentar lagi.", "Too many failed attempts. Please try again later."),
    ("auth.registerSuccess", "Pendaftaran berjaya. Sila sahkan emel anda sebelum log masuk.", "Registration successful. Please verify your email before logging in."),
    ("auth.registerSuccessActive", "Pendaftaran berjaya. Sila log masuk.", "Registration successful. Please log in."),
    ("auth.emailTaken", "Emel ini telah didaftarkan", "This email is already registered"),
    ("auth.unverified", "Emel anda belum disahkan", "Your email has not been verified"),
    ("auth.verified", "Emel berjaya disahkan. Sila log masuk.", "Email verified. Please log in."),
    ("auth.verifyInvalid", "Pautan pengesahan tidak sah", "Invalid verification link"),
    ("auth.signedOut", "Anda telah log keluar", "You have been logged out"),

    // Roles
    ("role.staff", "Anggota", "Staff"),
    ("role.committee", "Jawatankuasa MBJ", "MBJ Committee"),
    ("role.chairman", "Pengerusi", "Chairman"),

    // Profile
    ("profile.title", "Profil", "Profile"),
    ("profile.personalInfo", "Maklumat Peribadi", "Personal Information"),
    ("profile.personalInfoDesc", "Kemaskini maklumat profil anda", "Update your profile information"),
    ("profile.phone", "No. Telefon", "Phone Number"),
    ("profile.department", "Jabatan", "Department"),
    ("profile.departmentPlaceholder", "Cth: Bahagian Pentadbiran", "E.g: Administration Division"),
    ("profile.position", "Jawatan", "Position"),
    ("profile.positionPlaceholder", "Cth: Pegawai Tadbir", "E.g: Administrative Officer"),
    ("profile.updateSuccess", "Profil berjaya dikemaskini", "Profile updated successfully"),
    ("profile.updateError", "Gagal mengemaskini profil", "Failed to update profile"),
    ("profile.languageSettings", "Tetapan Bahasa", "Language Settings"),
    ("profile.languageSettingsDesc", "Pilih bahasa pilihan anda untuk antaramuka", "Choose your preferred interface language"),
    ("profile.languageUpdateSuccess", "Bahasa berjaya dikemaskini", "Language updated successfully"),
    ("profile.memberSince", "Ahli sejak", "Member since"),

    // Header
    ("header.portalTitle", "Portal Digital MBJ", "MBJ Digital Portal"),
    ("header.organization", "JPJ Negeri Melaka", "JPJ Melaka State"),
    ("header.language", "Bahasa", "Language"),
    ("language.ms", "Bahasa Melayu", "Bahasa Melayu"),
    ("language.en", "English", "English"),

    // Validation
    ("validation.required", "Medan ini diperlukan", "This field is required"),
    ("validation.failed", "Sila betulkan ralat dalam borang", "Please correct the errors in the form"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn translates_known_keys_per_language() {
        assert_eq!(Language::Ms.t("nav.dashboard"), "Papan Pemuka");
        assert_eq!(Language::En.t("nav.dashboard"), "Dashboard");
        assert_eq!(Language::En.t("common.noData"), "No data available");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(Language::Ms.t("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn table_has_no_duplicate_keys() {
        assert_eq!(TABLE.len(), ENTRIES.len());
    }

    #[test]
    fn language_codes_round_trip() {
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code("ms"), Some(Language::Ms));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::default(), Language::Ms);
    }

    #[test]
    fn localized_text_prefers_english_only_when_present() {
        assert_eq!(resolve_localized_text("Mesyuarat", Some("Meeting"), Language::En), "Meeting");
        assert_eq!(resolve_localized_text("Mesyuarat", Some("Meeting"), Language::Ms), "Mesyuarat");
        assert_eq!(resolve_localized_text("Mesyuarat", None, Language::En), "Mesyuarat");
        assert_eq!(resolve_localized_text("Mesyuarat", Some("   "), Language::En), "Mesyuarat");
    }

    #[test]
    fn dates_render_in_portal_timezone_with_localized_month() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        // 2026-10-15 20:30 UTC is already 16 Oct in UTC+8.
        let ts = Utc.with_ymd_and_hms(2026, 10, 15, 20, 30, 0).unwrap();
        assert_eq!(format_date(&ts, &offset, Language::Ms), "16 Okt 2026");
        assert_eq!(format_date(&ts, &offset, Language::En), "16 Oct 2026");
        assert_eq!(format_datetime(&ts, &offset, Language::En), "16 Oct 2026, 04:30");
    }
}
