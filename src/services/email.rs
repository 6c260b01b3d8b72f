use std::time::Duration;

use lettre::{
    Message, SmtpTransport, Transport,
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
};
use log::{error, info, warn};

type SendResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

// The SMTP call gets a bounded timeout so a stalled relay cannot hang a
// request indefinitely.
const SMTP_TIMEOUT_SECS: u64 = 10;

pub struct EmailService;

impl EmailService {
    pub async fn send_otp_email(email: &str, full_name: &str, code: &str) -> bool {
        match Self::try_send_otp(email, full_name, code).await {
            Ok(_) => {
                info!("OTP email sent successfully to {}", email);
                true
            }
            Err(e) => {
                error!("Failed to send OTP email to {}: {}", email, e);
                false
            }
        }
    }

    pub async fn send_welcome_email(email: &str, name: &str) -> bool {
        match Self::try_send_welcome(email, name).await {
            Ok(_) => {
                info!("Welcome email sent to {}", email);
                true
            }
            Err(e) => {
                error!("Failed to send welcome email: {}", e);
                false
            }
        }
    }

    pub async fn send_application_status_email(
        email: &str,
        candidate_name: &str,
        status: &str,
        job_title: &str,
        company: &str,
    ) -> bool {
        match Self::try_send_application_status(email, candidate_name, status, job_title, company).await {
            Ok(_) => {
                info!("Application status email sent to {}", email);
                true
            }
            Err(e) => {
                error!("Failed to send application status email to {}: {}", email, e);
                false
            }
        }
    }

    async fn try_send_otp(email: &str, full_name: &str, code: &str) -> SendResult {
        let to_mailbox: Mailbox = email.parse()?;
        let display_name = if full_name.is_empty() { "there" } else { full_name };

        let email_body = format!(
            r#"
            <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0; border-radius: 5px;">
                <h2 style="color: #4a86e8;">ManageJob Email Verification</h2>
                <p>Hi {},</p>
                <p>Thank you for registering with ManageJob! To complete your registration, please use the verification code below:</p>
                <div style="background-color: #f5f5f5; padding: 10px; border-radius: 5px; text-align: center; font-size: 24px; letter-spacing: 5px; margin: 20px 0;">
                    <strong>{}</strong>
                </div>
                <p>This code will expire in 10 minutes.</p>
                <p>If you didn't request this, please ignore this email.</p>
                <p>Best regards,<br>ManageJob Team</p>
            </div>
            "#,
            display_name, code
        );

        let email_message = Message::builder()
            .from(Self::from_mailbox()?)
            .to(to_mailbox)
            .subject("Your OTP for ManageJob Registration")
            .header(ContentType::TEXT_HTML)
            .body(email_body)?;

        Self::deliver(email_message).await
    }

    async fn try_send_welcome(email: &str, name: &str) -> SendResult {
        let to_mailbox: Mailbox = email.parse()?;
        let display_name = if name.is_empty() { "there" } else { name };

        let email_body = format!(
            r#"
            <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0; border-radius: 5px;">
                <h2 style="color: #4a86e8;">Welcome to ManageJob!</h2>
                <p>Hi {},</p>
                <p>Thank you for joining ManageJob! Your account has been successfully created.</p>
                <p>You can now log in and start exploring job opportunities that match your skills and experience.</p>
                <p>Best regards,<br>ManageJob Team</p>
            </div>
            "#,
            display_name
        );

        let email_message = Message::builder()
            .from(Self::from_mailbox()?)
            .to(to_mailbox)
            .subject("Welcome to ManageJob!")
            .header(ContentType::TEXT_HTML)
            .body(email_body)?;

        Self::deliver(email_message).await
    }

    async fn try_send_application_status(
        email: &str,
        candidate_name: &str,
        status: &str,
        job_title: &str,
        company: &str,
    ) -> SendResult {
        let to_mailbox: Mailbox = email.parse()?;
        let subject = format!("Update on Your Application for {} at {}", job_title, company);

        let body = match status {
            "applied" => format!(
                "Dear {},\n\nYour application for the {} position at {} has been received. We will review it soon.\n\nBest regards,\nRecruitment Team",
                candidate_name, job_title, company
            ),
            "under_review" => format!(
                "Dear {},\n\nYour application for the {} position at {} is currently under review. We'll get back to you soon.\n\nBest regards,\nRecruitment Team",
                candidate_name, job_title, company
            ),
            "interview" => format!(
                "Dear {},\n\nCongratulations! You've been selected for an interview for the {} position at {}. Please reply to this email to schedule a time.\n\nBest regards,\nRecruitment Team",
                candidate_name, job_title, company
            ),
            "accepted" => format!(
                "Dear {},\n\nWe are thrilled to inform you that you have been accepted for the {} position at {}! Please reply to this email for next steps.\n\nBest regards,\nRecruitment Team",
                candidate_name, job_title, company
            ),
            "rejected" => format!(
                "Dear {},\n\nThank you for applying for the {} position at {}. Unfortunately, we have decided to move forward with other candidates at this time. We wish you the best in your job search.\n\nBest regards,\nRecruitment Team",
                candidate_name, job_title, company
            ),
            other => format!(
                "Dear {},\n\nYour application status for the {} position at {} has been updated to \"{}\". Please contact us if you have any questions.\n\nBest regards,\nRecruitment Team",
                candidate_name, job_title, company, other
            ),
        };

        let email_message = Message::builder()
            .from(Self::from_mailbox()?)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        Self::deliver(email_message).await
    }

    fn from_mailbox() -> Result<Mailbox, Box<dyn std::error::Error + Send + Sync>> {
        Ok(crate::config::Config::mail_from().parse()?)
    }

    async fn deliver(email_message: Message) -> SendResult {
        let mail_user = crate::config::Config::mail_user();
        let mail_password = crate::config::Config::mail_password();

        if mail_user.is_empty() || mail_password.is_empty() {
            warn!("Email credentials not configured. Skipping email send.");
            return Err("Email not configured".into());
        }

        let creds = Credentials::new(mail_user, mail_password);
        let mailer = SmtpTransport::relay(&crate::config::Config::mail_host())?
            .credentials(creds)
            .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECS)))
            .build();

        // SmtpTransport::send is blocking; keep it off the async workers.
        tokio::task::spawn_blocking(move || mailer.send(&email_message)).await??;
        Ok(())
    }
}
