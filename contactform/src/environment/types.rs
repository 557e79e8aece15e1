use contactform_core_contact_impl::ContactServiceImpl;
use contactform_core_health_impl::HealthServiceImpl;
use contactform_email_impl::EmailServiceImpl;
use contactform_extern_impl::contact::ContactApiServiceImpl;
use contactform_templates_impl::TemplateServiceImpl;

// API
pub type RestServer<Email = EmailService> =
    contactform_api_rest::RestServer<Health<Email>, Contact<Email>>;

// Core
pub type Contact<Email = EmailService> = ContactServiceImpl<Template, Email>;
pub type Health<Email = EmailService> = HealthServiceImpl<Email>;

// Email
pub type EmailService = EmailServiceImpl;

// Extern
pub type ContactApi = ContactApiServiceImpl;

// Form
pub type ContactForm = contactform_form::ContactForm<ContactApi>;

// Templates
pub type Template = TemplateServiceImpl;
