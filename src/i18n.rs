//! Display locales and the user-facing text catalog.

use chrono::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLocale {
    #[default]
    Spanish,
    English,
}

impl DisplayLocale {
    /// Accepts `es`, `es_ES`, `es-ES`, `en`, `en_US`, ... case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let language = tag
            .trim()
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "es" => Some(Self::Spanish),
            "en" => Some(Self::English),
            _ => None,
        }
    }

    pub fn chrono_locale(self) -> Locale {
        match self {
            Self::Spanish => Locale::es_ES,
            Self::English => Locale::en_US,
        }
    }

    pub fn html_lang(self) -> &'static str {
        match self {
            Self::Spanish => "es",
            Self::English => "en",
        }
    }

    /// Weekday, day, month and year in the locale's own word order.
    pub fn long_date_format(self) -> &'static str {
        match self {
            Self::Spanish => "%A, %-d de %B de %Y",
            Self::English => "%A, %B %-d, %Y",
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Self::Spanish => &SPANISH,
            Self::English => &ENGLISH,
        }
    }
}

pub struct Messages {
    pub booking_title: &'static str,
    pub booking_subtitle: &'static str,
    pub admin_title: &'static str,
    pub prev_day: &'static str,
    pub next_day: &'static str,
    pub loading: &'static str,
    pub close: &'static str,
    pub back: &'static str,
    pub not_applicable: &'static str,
    pub minutes: &'static str,
    pub at_time: &'static str,
    pub weekdays: [&'static str; 7],

    pub slots_empty: &'static str,
    pub slots_unavailable: &'static str,
    pub slots_failed: &'static str,
    pub slot_taken: &'static str,
    pub services_failed: &'static str,
    pub server_unreachable: &'static str,

    pub client_label: &'static str,
    pub phone_label: &'static str,
    pub service_label: &'static str,
    pub service_placeholder: &'static str,
    pub recurrence_label: &'static str,
    pub recurrence_none: &'static str,
    pub recurrence_weekly: &'static str,
    pub recurrence_monthly: &'static str,
    pub recurrence_end_label: &'static str,
    pub notes_label: &'static str,
    pub confirm_booking: &'static str,
    pub processing: &'static str,
    pub booked: &'static str,
    pub booked_recurring: &'static str,
    pub booking_failed: &'static str,

    pub field_required: &'static str,
    pub text_too_long: &'static str,
    pub phone_invalid: &'static str,
    pub service_invalid: &'static str,
    pub date_invalid: &'static str,
    pub time_invalid: &'static str,
    pub recurrence_invalid: &'static str,
    pub recurrence_end_required: &'static str,
    pub recurrence_end_too_early: &'static str,
    pub duration_invalid: &'static str,
    pub price_invalid: &'static str,
    pub day_invalid: &'static str,
    pub time_range_invalid: &'static str,
    pub form_invalid: &'static str,

    pub tab_appointments: &'static str,
    pub tab_services: &'static str,
    pub tab_availability: &'static str,
    pub filter_date: &'static str,
    pub filter_status: &'static str,
    pub status_all: &'static str,
    pub status_active: &'static str,
    pub status_cancelled: &'static str,
    pub status_completed: &'static str,
    pub apply_filters: &'static str,
    pub col_date: &'static str,
    pub col_time: &'static str,
    pub col_client: &'static str,
    pub col_phone: &'static str,
    pub col_service: &'static str,
    pub col_status: &'static str,
    pub col_actions: &'static str,
    pub appointments_empty: &'static str,
    pub appointments_failed: &'static str,
    pub view: &'static str,
    pub cancel: &'static str,
    pub cancel_series: &'static str,
    pub confirm_cancel: &'static str,
    pub appointment_cancelled: &'static str,
    pub cancel_failed: &'static str,
    pub details_title: &'static str,
    pub recurrence_until: &'static str,
    pub series_dates: &'static str,
    pub record_missing: &'static str,

    pub services_empty: &'static str,
    pub new_service: &'static str,
    pub edit_service: &'static str,
    pub col_name: &'static str,
    pub col_description: &'static str,
    pub col_duration: &'static str,
    pub col_price: &'static str,
    pub active: &'static str,
    pub inactive: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    pub save: &'static str,
    pub saving: &'static str,
    pub confirm_delete_service: &'static str,
    pub service_saved: &'static str,
    pub service_deleted: &'static str,
    pub service_save_failed: &'static str,
    pub service_delete_failed: &'static str,

    pub availability_empty: &'static str,
    pub availability_failed: &'static str,
    pub new_availability: &'static str,
    pub edit_availability: &'static str,
    pub day_label: &'static str,
    pub start_label: &'static str,
    pub end_label: &'static str,
    pub slot_duration_label: &'static str,
    pub enabled: &'static str,
    pub disabled: &'static str,
    pub confirm_delete_availability: &'static str,
    pub availability_saved: &'static str,
    pub availability_deleted: &'static str,
    pub availability_save_failed: &'static str,
    pub availability_delete_failed: &'static str,
}

impl Messages {
    /// Monday-first day name; out-of-range days yield `None`.
    pub fn weekday(&self, day_of_week: u8) -> Option<&'static str> {
        self.weekdays.get(usize::from(day_of_week)).copied()
    }
}

pub static SPANISH: Messages = Messages {
    booking_title: "Reserva tu cita",
    booking_subtitle: "Elige un día y un horario disponible.",
    admin_title: "Panel de administración",
    prev_day: "Día anterior",
    next_day: "Día siguiente",
    loading: "Cargando...",
    close: "Cerrar",
    back: "Volver",
    not_applicable: "N/A",
    minutes: "min",
    at_time: "a las",
    weekdays: ["Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo"],

    slots_empty: "No hay horarios disponibles para esta fecha",
    slots_unavailable: "No hay disponibilidad para esta fecha",
    slots_failed: "Error al cargar los horarios disponibles",
    slot_taken: "Ese horario ya no está disponible",
    services_failed: "Error al cargar los servicios",
    server_unreachable: "Error al conectar con el servidor",

    client_label: "Nombre completo",
    phone_label: "Teléfono",
    service_label: "Servicio",
    service_placeholder: "Selecciona un servicio",
    recurrence_label: "Repetir",
    recurrence_none: "No se repite",
    recurrence_weekly: "Semanal",
    recurrence_monthly: "Mensual",
    recurrence_end_label: "Repetir hasta",
    notes_label: "Notas",
    confirm_booking: "Confirmar cita",
    processing: "Procesando...",
    booked: "Tu cita ha sido reservada exitosamente. Recibirás confirmación en tu correo.",
    booked_recurring: "Tu cita recurrente ha sido reservada exitosamente. Recibirás confirmación en tu correo.",
    booking_failed: "Error al crear la cita",

    field_required: "Este campo es obligatorio",
    text_too_long: "El texto es demasiado largo",
    phone_invalid: "Introduce un teléfono válido (de 7 a 15 dígitos)",
    service_invalid: "Selecciona un servicio válido",
    date_invalid: "Fecha no válida",
    time_invalid: "Hora no válida",
    recurrence_invalid: "Tipo de repetición no válido",
    recurrence_end_required: "Indica hasta cuándo se repite la cita",
    recurrence_end_too_early: "La fecha final debe ser posterior a la fecha de la cita",
    duration_invalid: "La duración debe estar entre 15 y 480 minutos",
    price_invalid: "Precio no válido",
    day_invalid: "Día no válido",
    time_range_invalid: "La hora de fin debe ser posterior a la de inicio",
    form_invalid: "Revisa los campos marcados",

    tab_appointments: "Citas",
    tab_services: "Servicios",
    tab_availability: "Disponibilidad",
    filter_date: "Fecha",
    filter_status: "Estado",
    status_all: "Todos",
    status_active: "Activa",
    status_cancelled: "Cancelada",
    status_completed: "Completada",
    apply_filters: "Filtrar",
    col_date: "Fecha",
    col_time: "Hora",
    col_client: "Cliente",
    col_phone: "Teléfono",
    col_service: "Servicio",
    col_status: "Estado",
    col_actions: "Acciones",
    appointments_empty: "No hay citas para mostrar",
    appointments_failed: "Error al cargar las citas",
    view: "Ver",
    cancel: "Cancelar",
    cancel_series: "Cancelar toda la serie",
    confirm_cancel: "¿Estás seguro de que deseas cancelar esta cita?",
    appointment_cancelled: "Cita cancelada exitosamente",
    cancel_failed: "Error al cancelar la cita",
    details_title: "Detalles de la cita",
    recurrence_until: "Hasta",
    series_dates: "Fechas de la serie",
    record_missing: "El registro ya no existe",

    services_empty: "No hay servicios configurados",
    new_service: "Nuevo servicio",
    edit_service: "Editar servicio",
    col_name: "Nombre",
    col_description: "Descripción",
    col_duration: "Duración",
    col_price: "Precio",
    active: "Activo",
    inactive: "Inactivo",
    edit: "Editar",
    delete: "Eliminar",
    save: "Guardar",
    saving: "Guardando...",
    confirm_delete_service: "¿Estás seguro de que deseas eliminar este servicio?",
    service_saved: "Servicio guardado exitosamente",
    service_deleted: "Servicio eliminado exitosamente",
    service_save_failed: "Error al guardar el servicio",
    service_delete_failed: "Error al eliminar el servicio",

    availability_empty: "No hay disponibilidad configurada",
    availability_failed: "Error al cargar la disponibilidad",
    new_availability: "Nueva disponibilidad",
    edit_availability: "Editar disponibilidad",
    day_label: "Día",
    start_label: "Hora de inicio",
    end_label: "Hora de fin",
    slot_duration_label: "Duración de cada turno (min)",
    enabled: "Habilitado",
    disabled: "Deshabilitado",
    confirm_delete_availability: "¿Estás seguro de que deseas eliminar esta disponibilidad?",
    availability_saved: "Disponibilidad guardada exitosamente",
    availability_deleted: "Disponibilidad eliminada exitosamente",
    availability_save_failed: "Error al guardar la disponibilidad",
    availability_delete_failed: "Error al eliminar la disponibilidad",
};

pub static ENGLISH: Messages = Messages {
    booking_title: "Book your appointment",
    booking_subtitle: "Pick a day and an open time.",
    admin_title: "Admin panel",
    prev_day: "Previous day",
    next_day: "Next day",
    loading: "Loading...",
    close: "Close",
    back: "Back",
    not_applicable: "N/A",
    minutes: "min",
    at_time: "at",
    weekdays: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"],

    slots_empty: "No open times for this date",
    slots_unavailable: "No availability for this date",
    slots_failed: "Could not load the available times",
    slot_taken: "That time is no longer available",
    services_failed: "Could not load the services",
    server_unreachable: "Could not reach the server",

    client_label: "Full name",
    phone_label: "Phone",
    service_label: "Service",
    service_placeholder: "Choose a service",
    recurrence_label: "Repeat",
    recurrence_none: "Does not repeat",
    recurrence_weekly: "Weekly",
    recurrence_monthly: "Monthly",
    recurrence_end_label: "Repeat until",
    notes_label: "Notes",
    confirm_booking: "Confirm booking",
    processing: "Processing...",
    booked: "Your appointment is booked. A confirmation is on its way to your inbox.",
    booked_recurring: "Your recurring appointment is booked. A confirmation is on its way to your inbox.",
    booking_failed: "Could not create the appointment",

    field_required: "This field is required",
    text_too_long: "The text is too long",
    phone_invalid: "Enter a valid phone number (7 to 15 digits)",
    service_invalid: "Choose a valid service",
    date_invalid: "Invalid date",
    time_invalid: "Invalid time",
    recurrence_invalid: "Invalid repeat option",
    recurrence_end_required: "Choose when the appointment stops repeating",
    recurrence_end_too_early: "The end date must be after the appointment date",
    duration_invalid: "Duration must be between 15 and 480 minutes",
    price_invalid: "Invalid price",
    day_invalid: "Invalid day",
    time_range_invalid: "The end time must be after the start time",
    form_invalid: "Please review the highlighted fields",

    tab_appointments: "Appointments",
    tab_services: "Services",
    tab_availability: "Availability",
    filter_date: "Date",
    filter_status: "Status",
    status_all: "All",
    status_active: "Active",
    status_cancelled: "Cancelled",
    status_completed: "Completed",
    apply_filters: "Filter",
    col_date: "Date",
    col_time: "Time",
    col_client: "Client",
    col_phone: "Phone",
    col_service: "Service",
    col_status: "Status",
    col_actions: "Actions",
    appointments_empty: "No appointments to show",
    appointments_failed: "Could not load the appointments",
    view: "View",
    cancel: "Cancel",
    cancel_series: "Cancel the whole series",
    confirm_cancel: "Are you sure you want to cancel this appointment?",
    appointment_cancelled: "Appointment cancelled",
    cancel_failed: "Could not cancel the appointment",
    details_title: "Appointment details",
    recurrence_until: "Until",
    series_dates: "Series dates",
    record_missing: "The record no longer exists",

    services_empty: "No services configured",
    new_service: "New service",
    edit_service: "Edit service",
    col_name: "Name",
    col_description: "Description",
    col_duration: "Duration",
    col_price: "Price",
    active: "Active",
    inactive: "Inactive",
    edit: "Edit",
    delete: "Delete",
    save: "Save",
    saving: "Saving...",
    confirm_delete_service: "Are you sure you want to delete this service?",
    service_saved: "Service saved",
    service_deleted: "Service deleted",
    service_save_failed: "Could not save the service",
    service_delete_failed: "Could not delete the service",

    availability_empty: "No availability configured",
    availability_failed: "Could not load the availability",
    new_availability: "New availability",
    edit_availability: "Edit availability",
    day_label: "Day",
    start_label: "Start time",
    end_label: "End time",
    slot_duration_label: "Slot length (min)",
    enabled: "Enabled",
    disabled: "Disabled",
    confirm_delete_availability: "Are you sure you want to delete this availability?",
    availability_saved: "Availability saved",
    availability_deleted: "Availability deleted",
    availability_save_failed: "Could not save the availability",
    availability_delete_failed: "Could not delete the availability",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_tags_resolve_by_language() {
        assert_eq!(DisplayLocale::from_tag("es_ES"), Some(DisplayLocale::Spanish));
        assert_eq!(DisplayLocale::from_tag("en-US"), Some(DisplayLocale::English));
        assert_eq!(DisplayLocale::from_tag("EN"), Some(DisplayLocale::English));
        assert_eq!(DisplayLocale::from_tag("fr_FR"), None);
        assert_eq!(DisplayLocale::from_tag(""), None);
    }

    #[test]
    fn weekday_names_start_on_monday() {
        let messages = DisplayLocale::Spanish.messages();
        assert_eq!(messages.weekday(0), Some("Lunes"));
        assert_eq!(messages.weekday(6), Some("Domingo"));
        assert_eq!(messages.weekday(7), None);
    }
}
