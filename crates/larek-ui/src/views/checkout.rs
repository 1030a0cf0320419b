//! The two checkout form dialogs.
//!
//! Both start blank every time they are shown, and their "next" button is
//! enabled only while every field holds a non-blank value.

use larek_commerce::{AddressPaymentForm, ContactForm, PaymentMethod};

use super::{ensure_visible, Button};
use crate::dialog::{Dialog, DialogContent, DialogId};
use crate::error::UiError;

const NEXT_LABEL: &str = "Далее";
const PAY_LABEL: &str = "Оплатить";

fn expect_empty(content: &DialogContent, name: &str) -> Result<(), UiError> {
    match content {
        DialogContent::Empty => Ok(()),
        other => Err(UiError::invalid_use(format!(
            "{name} cannot render {} content",
            other.kind()
        ))),
    }
}

/// Delivery address and payment method.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressPaymentDialog {
    visible: bool,
    form: AddressPaymentForm,
    next: Button,
}

impl Default for AddressPaymentDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressPaymentDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            form: AddressPaymentForm::default(),
            next: Button::new(NEXT_LABEL, false),
        }
    }

    pub fn address(&self) -> &str {
        &self.form.address
    }

    pub fn payment(&self) -> Option<PaymentMethod> {
        self.form.payment
    }

    pub fn next_button(&self) -> &Button {
        &self.next
    }

    /// Payment options with their selection state, in display order.
    pub fn payment_options(&self) -> [(PaymentMethod, bool); 2] {
        PaymentMethod::ALL.map(|m| (m, self.form.payment == Some(m)))
    }

    pub fn input_address(&mut self, text: &str) -> Result<(), UiError> {
        ensure_visible(self.visible, "address/payment")?;
        self.form.address = text.to_string();
        self.refresh();
        Ok(())
    }

    /// Select a payment method, deselecting the other.
    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), UiError> {
        ensure_visible(self.visible, "address/payment")?;
        self.form.payment = Some(method);
        self.refresh();
        Ok(())
    }

    /// Click "next", yielding the trimmed form.
    pub fn next_clicked(&self) -> Result<AddressPaymentForm, UiError> {
        ensure_visible(self.visible, "address/payment")?;
        self.next.click()?;
        Ok(AddressPaymentForm::new(
            self.form.address.trim(),
            self.form.payment,
        ))
    }

    fn refresh(&mut self) {
        self.next = Button::new(NEXT_LABEL, self.form.is_complete());
    }
}

impl Dialog for AddressPaymentDialog {
    fn id(&self) -> DialogId {
        DialogId::AddressPayment
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn on_show(&mut self) {
        self.form = AddressPaymentForm::default();
    }

    fn render(&mut self, content: DialogContent) -> Result<(), UiError> {
        expect_empty(&content, "address/payment")?;
        self.refresh();
        Ok(())
    }
}

/// Email and phone, plus the submission status of the order.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDialog {
    visible: bool,
    form: ContactForm,
    submitting: bool,
    error: Option<String>,
    next: Button,
}

impl Default for ContactDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            form: ContactForm::default(),
            submitting: false,
            error: None,
            next: Button::new(PAY_LABEL, false),
        }
    }

    pub fn email(&self) -> &str {
        &self.form.email
    }

    pub fn phone(&self) -> &str {
        &self.form.phone
    }

    pub fn next_button(&self) -> &Button {
        &self.next
    }

    /// Check if the order is on its way to the server.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message of the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn input_email(&mut self, text: &str) -> Result<(), UiError> {
        ensure_visible(self.visible, "contact")?;
        self.form.email = text.to_string();
        self.refresh();
        Ok(())
    }

    pub fn input_phone(&mut self, text: &str) -> Result<(), UiError> {
        ensure_visible(self.visible, "contact")?;
        self.form.phone = text.to_string();
        self.refresh();
        Ok(())
    }

    /// Click "pay", yielding the trimmed form.
    pub fn next_clicked(&self) -> Result<ContactForm, UiError> {
        ensure_visible(self.visible, "contact")?;
        self.next.click()?;
        Ok(ContactForm::new(
            self.form.email.trim(),
            self.form.phone.trim(),
        ))
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
        if submitting {
            self.error = None;
        }
        self.refresh();
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    fn refresh(&mut self) {
        self.next = Button::new(PAY_LABEL, !self.submitting && self.form.is_complete());
    }
}

impl Dialog for ContactDialog {
    fn id(&self) -> DialogId {
        DialogId::Contact
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn on_show(&mut self) {
        self.form = ContactForm::default();
        self.submitting = false;
        self.error = None;
    }

    fn render(&mut self, content: DialogContent) -> Result<(), UiError> {
        expect_empty(&content, "contact")?;
        self.refresh();
        Ok(())
    }
}
