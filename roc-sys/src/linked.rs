//! Entry points resolved from the system `libroc`.

use std::ffi::{c_char, c_int};

use crate::types::*;

#[repr(C)]
pub struct roc_context {
    _private: [u8; 0],
}

#[repr(C)]
pub struct roc_receiver {
    _private: [u8; 0],
}

#[repr(C)]
pub struct roc_sender {
    _private: [u8; 0],
}

#[repr(C)]
pub struct roc_endpoint {
    _private: [u8; 0],
}

#[link(name = "roc")]
extern "C" {
    pub fn roc_context_open(config: *const roc_context_config, result: *mut *mut roc_context) -> c_int;
    pub fn roc_context_close(context: *mut roc_context) -> c_int;

    pub fn roc_receiver_open(
        context: *mut roc_context,
        config: *const roc_receiver_config,
        result: *mut *mut roc_receiver,
    ) -> c_int;
    pub fn roc_receiver_set_multicast_group(
        receiver: *mut roc_receiver,
        slot: roc_slot,
        iface: roc_interface,
        ip: *const c_char,
    ) -> c_int;
    pub fn roc_receiver_set_reuseaddr(
        receiver: *mut roc_receiver,
        slot: roc_slot,
        iface: roc_interface,
        enabled: c_int,
    ) -> c_int;
    pub fn roc_receiver_bind(
        receiver: *mut roc_receiver,
        slot: roc_slot,
        iface: roc_interface,
        endpoint: *mut roc_endpoint,
    ) -> c_int;
    pub fn roc_receiver_read(receiver: *mut roc_receiver, frame: *mut roc_frame) -> c_int;
    pub fn roc_receiver_close(receiver: *mut roc_receiver) -> c_int;

    pub fn roc_sender_open(
        context: *mut roc_context,
        config: *const roc_sender_config,
        result: *mut *mut roc_sender,
    ) -> c_int;
    pub fn roc_sender_set_outgoing_address(
        sender: *mut roc_sender,
        slot: roc_slot,
        iface: roc_interface,
        ip: *const c_char,
    ) -> c_int;
    pub fn roc_sender_set_reuseaddr(
        sender: *mut roc_sender,
        slot: roc_slot,
        iface: roc_interface,
        enabled: c_int,
    ) -> c_int;
    pub fn roc_sender_connect(
        sender: *mut roc_sender,
        slot: roc_slot,
        iface: roc_interface,
        endpoint: *const roc_endpoint,
    ) -> c_int;
    pub fn roc_sender_write(sender: *mut roc_sender, frame: *const roc_frame) -> c_int;
    pub fn roc_sender_close(sender: *mut roc_sender) -> c_int;

    pub fn roc_endpoint_allocate(result: *mut *mut roc_endpoint) -> c_int;
    pub fn roc_endpoint_set_uri(endpoint: *mut roc_endpoint, uri: *const c_char) -> c_int;
    pub fn roc_endpoint_set_protocol(endpoint: *mut roc_endpoint, proto: roc_protocol) -> c_int;
    pub fn roc_endpoint_set_host(endpoint: *mut roc_endpoint, host: *const c_char) -> c_int;
    pub fn roc_endpoint_set_port(endpoint: *mut roc_endpoint, port: c_int) -> c_int;
    pub fn roc_endpoint_set_resource(endpoint: *mut roc_endpoint, encoded_resource: *const c_char) -> c_int;
    pub fn roc_endpoint_set_service(endpoint: *mut roc_endpoint, service: *const c_char) -> c_int;
    pub fn roc_endpoint_get_uri(endpoint: *const roc_endpoint, buf: *mut c_char, bufsz: *mut usize) -> c_int;
    pub fn roc_endpoint_get_protocol(endpoint: *const roc_endpoint, proto: *mut roc_protocol) -> c_int;
    pub fn roc_endpoint_get_host(endpoint: *const roc_endpoint, buf: *mut c_char, bufsz: *mut usize) -> c_int;
    pub fn roc_endpoint_get_port(endpoint: *const roc_endpoint, port: *mut c_int) -> c_int;
    pub fn roc_endpoint_get_resource(endpoint: *const roc_endpoint, buf: *mut c_char, bufsz: *mut usize)
        -> c_int;
    pub fn roc_endpoint_deallocate(endpoint: *mut roc_endpoint) -> c_int;

    pub fn roc_log_set_level(level: roc_log_level);
    pub fn roc_log_set_handler(handler: roc_log_handler);

    pub fn roc_version_load(version: *mut roc_version);
}
